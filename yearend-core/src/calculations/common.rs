//! Common utility functions for reconciliation calculations.
//!
//! All amounts are whole yen, so the only rounding rule the engine needs is
//! flooring toward negative infinity.

use rust_decimal::Decimal;

/// Floors a decimal value to a whole yen amount.
///
/// Rounds toward negative infinity, so negative fractions move away from
/// zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use yearend_core::calculations::common::floor_yen;
///
/// assert_eq!(floor_yen(dec!(118800.99)), dec!(118800));
/// assert_eq!(floor_yen(dec!(550000)), dec!(550000));
/// assert_eq!(floor_yen(dec!(-0.5)), dec!(-1));
/// ```
pub fn floor_yen(value: Decimal) -> Decimal {
    value.floor()
}

/// Converts an integer percentage into an exact decimal rate.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use yearend_core::calculations::common::percent;
///
/// assert_eq!(percent(33), dec!(0.33));
/// assert_eq!(percent(5), dec!(0.05));
/// ```
pub fn percent(rate_percent: i64) -> Decimal {
    Decimal::new(rate_percent, 2)
}

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use yearend_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100), dec!(200)), dec!(200));
/// assert_eq!(max(dec!(-100), dec!(0)), dec!(0));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}
