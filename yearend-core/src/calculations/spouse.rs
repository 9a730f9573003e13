//! Spouse deduction and spouse special deduction.
//!
//! # Decision structure
//!
//! 1. Employee income above 10,000,000: no deduction of either kind.
//! 2. Spouse income up to 480,000: spouse deduction of 380,000, replaced by
//!    the employee-income overwrites in [`SPOUSE_DEDUCTION_OVERWRITES`].
//! 3. Spouse income up to 1,330,000: spouse special deduction looked up in
//!    [`SPOUSE_SPECIAL_BASE_AMOUNTS`], scaled by the multiplier chosen from
//!    [`SPOUSE_SPECIAL_MULTIPLIER_OVERWRITES`] and floored.
//! 4. Otherwise: no deduction of either kind.
//!
//! Overwrite lists are evaluated in order and every matching entry replaces
//! the value set by the previous one, so the last match wins.
//!
//! The multiplier list gives 67% above 9,500,000 but 33% between 9,000,000
//! and 9,500,000, so the higher income tier keeps a larger share. This is
//! reproduced as published and logged at `warn` level whenever it applies,
//! pending tax-law review.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use yearend_core::calculations::spouse_deduction;
//!
//! let result = spouse_deduction(dec!(9600000), dec!(0));
//!
//! assert_eq!(result.spouse_deduction, dec!(130000));
//! assert_eq!(result.spouse_special_deduction, dec!(0));
//! ```

use rust_decimal::Decimal;
use tracing::warn;

use crate::calculations::common::{floor_yen, percent};
use crate::calculations::validation::{ReconciliationError, validate_amount};

/// Employee income above which neither deduction is available.
pub const SPOUSE_PHASE_OUT_INCOME: i64 = 10_000_000;

/// Highest spouse income that qualifies for the ordinary spouse deduction.
pub const SPOUSE_DEDUCTION_INCOME_LIMIT: i64 = 480_000;

/// Highest spouse income that qualifies for the spouse special deduction.
pub const SPOUSE_SPECIAL_INCOME_LIMIT: i64 = 1_330_000;

/// Ordinary spouse deduction before any employee-income overwrite.
pub const SPOUSE_DEDUCTION_BASE: i64 = 380_000;

/// `(employee income threshold, amount)`; applies when income exceeds the
/// threshold.
pub const SPOUSE_DEDUCTION_OVERWRITES: &[(i64, i64)] =
    &[(9_000_000, 260_000), (9_500_000, 130_000)];

/// `(employee income threshold, multiplier percent)`; applies when income
/// exceeds the threshold. Without a match the multiplier is 100%.
pub const SPOUSE_SPECIAL_MULTIPLIER_OVERWRITES: &[(i64, i64)] =
    &[(9_000_000, 33), (9_500_000, 67)];

/// `(spouse income ceiling, amount)`; the first ceiling at or above the
/// spouse income applies.
pub const SPOUSE_SPECIAL_BASE_AMOUNTS: &[(i64, i64)] = &[
    (950_000, 380_000),
    (1_000_000, 360_000),
    (1_050_000, 310_000),
    (1_100_000, 260_000),
    (1_150_000, 210_000),
    (1_200_000, 160_000),
    (1_250_000, 110_000),
    (1_300_000, 60_000),
    (1_330_000, 30_000),
];

/// The pair of spouse-related deductions. At most one is non-zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpouseDeduction {
    pub spouse_deduction: Decimal,
    pub spouse_special_deduction: Decimal,
}

/// Computes the spouse deduction pair from the employee's and the spouse's
/// annual income.
pub fn spouse_deduction(
    employee_income: Decimal,
    spouse_income: Decimal,
) -> SpouseDeduction {
    if employee_income > Decimal::from(SPOUSE_PHASE_OUT_INCOME) {
        return SpouseDeduction::default();
    }

    if spouse_income <= Decimal::from(SPOUSE_DEDUCTION_INCOME_LIMIT) {
        let amount = apply_overwrites(
            employee_income,
            SPOUSE_DEDUCTION_BASE,
            SPOUSE_DEDUCTION_OVERWRITES,
        );
        return SpouseDeduction {
            spouse_deduction: Decimal::from(amount),
            spouse_special_deduction: Decimal::ZERO,
        };
    }

    if spouse_income <= Decimal::from(SPOUSE_SPECIAL_INCOME_LIMIT) {
        return SpouseDeduction {
            spouse_deduction: Decimal::ZERO,
            spouse_special_deduction: spouse_special_deduction(employee_income, spouse_income),
        };
    }

    SpouseDeduction::default()
}

/// Like [`spouse_deduction`], but rejects negative or fractional incomes.
///
/// # Errors
///
/// Returns [`ReconciliationError::InvalidInput`] naming the offending
/// income.
pub fn spouse_deduction_validated(
    employee_income: Decimal,
    spouse_income: Decimal,
) -> Result<SpouseDeduction, ReconciliationError> {
    validate_amount("employee_income", employee_income)?;
    validate_amount("spouse_income", spouse_income)?;
    Ok(spouse_deduction(employee_income, spouse_income))
}

/// Special deduction for a spouse income above the ordinary limit and at or
/// below [`SPOUSE_SPECIAL_INCOME_LIMIT`].
fn spouse_special_deduction(
    employee_income: Decimal,
    spouse_income: Decimal,
) -> Decimal {
    let base = SPOUSE_SPECIAL_BASE_AMOUNTS
        .iter()
        .find(|&&(ceiling, _)| spouse_income <= Decimal::from(ceiling))
        .map_or(0, |&(_, amount)| amount);

    let multiplier_percent =
        apply_overwrites(employee_income, 100, SPOUSE_SPECIAL_MULTIPLIER_OVERWRITES);

    let superseded_smaller = SPOUSE_SPECIAL_MULTIPLIER_OVERWRITES
        .iter()
        .any(|&(threshold, pct)| {
            employee_income > Decimal::from(threshold) && pct < multiplier_percent
        });
    if superseded_smaller {
        warn!(
            employee_income = %employee_income,
            multiplier_percent,
            "spouse special multiplier for this income tier exceeds a lower tier's multiplier"
        );
    }

    floor_yen(Decimal::from(base) * percent(multiplier_percent))
}

/// Starts from `initial` and replaces it with every entry whose threshold
/// the employee income exceeds, in list order.
fn apply_overwrites(
    employee_income: Decimal,
    initial: i64,
    overwrites: &[(i64, i64)],
) -> i64 {
    let mut value = initial;
    for &(threshold, replacement) in overwrites {
        if employee_income > Decimal::from(threshold) {
            value = replacement;
        }
    }
    value
}
