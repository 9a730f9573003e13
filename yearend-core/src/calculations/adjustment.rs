//! Housing loan credit and refund/additional payment resolution.

use rust_decimal::Decimal;

use crate::calculations::common::max;

/// Difference between withheld tax and the final tax for the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjustment {
    /// `withheld_tax - final_tax`, signed.
    pub difference: Decimal,

    /// `abs(difference)`.
    pub amount: Decimal,

    /// `true` only when `difference > 0`.
    pub is_refund: bool,
}

/// Subtracts the housing loan credit from the calculated tax, flooring at
/// zero. A credit larger than the tax does not produce a refund by itself.
pub fn apply_housing_loan_credit(
    calculated_tax: Decimal,
    housing_loan_credit: Decimal,
) -> Decimal {
    max(calculated_tax - housing_loan_credit, Decimal::ZERO)
}

/// Compares withheld tax against the final tax.
///
/// A positive difference is a refund. Zero or a negative difference is an
/// additional payment of `abs(difference)`, so a balanced year is reported
/// as a zero additional payment.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use yearend_core::calculations::resolve_adjustment;
///
/// let refund = resolve_adjustment(dec!(700000), dec!(224500));
/// assert!(refund.is_refund);
/// assert_eq!(refund.amount, dec!(475500));
///
/// let balanced = resolve_adjustment(dec!(100000), dec!(100000));
/// assert!(!balanced.is_refund);
/// assert_eq!(balanced.amount, dec!(0));
/// ```
pub fn resolve_adjustment(
    withheld_tax: Decimal,
    final_tax: Decimal,
) -> Adjustment {
    let difference = withheld_tax - final_tax;
    Adjustment {
        difference,
        amount: difference.abs(),
        is_refund: difference > Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // apply_housing_loan_credit tests
    // =========================================================================

    #[test]
    fn credit_reduces_tax() {
        assert_eq!(apply_housing_loan_credit(dec!(224500), dec!(100000)), dec!(124500));
    }

    #[test]
    fn credit_equal_to_tax_erases_it() {
        assert_eq!(apply_housing_loan_credit(dec!(224500), dec!(224500)), dec!(0));
    }

    #[test]
    fn credit_larger_than_tax_floors_at_zero() {
        assert_eq!(apply_housing_loan_credit(dec!(50000), dec!(400000)), dec!(0));
    }

    #[test]
    fn zero_credit_leaves_tax_unchanged() {
        assert_eq!(apply_housing_loan_credit(dec!(372500), dec!(0)), dec!(372500));
    }

    // =========================================================================
    // resolve_adjustment tests
    // =========================================================================

    #[test]
    fn overpayment_is_refund() {
        let result = resolve_adjustment(dec!(700000), dec!(224500));

        assert_eq!(
            result,
            Adjustment {
                difference: dec!(475500),
                amount: dec!(475500),
                is_refund: true,
            }
        );
    }

    #[test]
    fn underpayment_is_additional_payment() {
        let result = resolve_adjustment(dec!(100000), dec!(372500));

        assert_eq!(
            result,
            Adjustment {
                difference: dec!(-272500),
                amount: dec!(272500),
                is_refund: false,
            }
        );
    }

    #[test]
    fn balanced_withholding_is_not_a_refund() {
        let result = resolve_adjustment(dec!(224500), dec!(224500));

        assert_eq!(
            result,
            Adjustment {
                difference: dec!(0),
                amount: dec!(0),
                is_refund: false,
            }
        );
    }

    #[test]
    fn one_yen_overpayment_is_refund() {
        let result = resolve_adjustment(dec!(1), dec!(0));

        assert!(result.is_refund);
        assert_eq!(result.amount, dec!(1));
    }
}
