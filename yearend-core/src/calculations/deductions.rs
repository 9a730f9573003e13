//! Itemized deduction aggregation.
//!
//! Life insurance, earthquake insurance and medical expense deductions are
//! capped before summation; amounts over a cap are truncated without error.
//! The housing loan amount is a tax credit and is not part of the total.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::Deductions;

pub const LIFE_INSURANCE_DEDUCTION_CAP: i64 = 120_000;
pub const EARTHQUAKE_INSURANCE_DEDUCTION_CAP: i64 = 50_000;
pub const MEDICAL_EXPENSE_DEDUCTION_CAP: i64 = 2_000_000;

/// Sums the itemized deductions, applying the statutory caps.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use yearend_core::Deductions;
/// use yearend_core::calculations::total_deductions;
///
/// let deductions = Deductions {
///     basic: dec!(480000),
///     life_insurance: dec!(150000),
///     ..Deductions::default()
/// };
///
/// // Life insurance is capped at 120,000.
/// assert_eq!(total_deductions(&deductions), dec!(600000));
/// ```
pub fn total_deductions(deductions: &Deductions) -> Decimal {
    let uncapped = deductions.basic
        + deductions.spouse
        + deductions.spouse_special
        + deductions.dependent
        + deductions.social_insurance
        + deductions.other;

    uncapped
        + capped(
            "life_insurance",
            deductions.life_insurance,
            LIFE_INSURANCE_DEDUCTION_CAP,
        )
        + capped(
            "earthquake_insurance",
            deductions.earthquake_insurance,
            EARTHQUAKE_INSURANCE_DEDUCTION_CAP,
        )
        + capped(
            "medical_expense",
            deductions.medical_expense,
            MEDICAL_EXPENSE_DEDUCTION_CAP,
        )
}

/// `min(amount, cap)`.
fn capped(
    field: &'static str,
    amount: Decimal,
    cap: i64,
) -> Decimal {
    let cap = Decimal::from(cap);
    if amount > cap {
        debug!(field, amount = %amount, cap = %cap, "deduction truncated to cap");
        cap
    } else {
        amount
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // capped tests
    // =========================================================================

    #[test]
    fn capped_keeps_amount_below_cap() {
        assert_eq!(capped("life_insurance", dec!(80000), 120_000), dec!(80000));
    }

    #[test]
    fn capped_keeps_amount_equal_to_cap() {
        assert_eq!(capped("life_insurance", dec!(120000), 120_000), dec!(120000));
    }

    #[test]
    fn capped_truncates_amount_above_cap() {
        assert_eq!(capped("life_insurance", dec!(120001), 120_000), dec!(120000));
    }

    // =========================================================================
    // total_deductions tests
    // =========================================================================

    #[test]
    fn total_deductions_of_empty_set_is_zero() {
        assert_eq!(total_deductions(&Deductions::default()), dec!(0));
    }

    #[test]
    fn total_deductions_sums_uncapped_fields() {
        let deductions = Deductions {
            basic: dec!(480000),
            spouse: dec!(380000),
            spouse_special: dec!(10000),
            dependent: dec!(630000),
            social_insurance: dec!(1000000),
            other: dec!(5000),
            ..Deductions::default()
        };

        assert_eq!(total_deductions(&deductions), dec!(2505000));
    }

    #[test]
    fn total_deductions_applies_all_three_caps() {
        let deductions = Deductions {
            life_insurance: dec!(150000),
            earthquake_insurance: dec!(70000),
            medical_expense: dec!(2500000),
            ..Deductions::default()
        };

        // 120,000 + 50,000 + 2,000,000
        assert_eq!(total_deductions(&deductions), dec!(2170000));
    }

    #[test]
    fn total_deductions_does_not_cap_social_insurance() {
        let deductions = Deductions {
            social_insurance: dec!(9000000),
            ..Deductions::default()
        };

        assert_eq!(total_deductions(&deductions), dec!(9000000));
    }

    #[test]
    fn total_deductions_excludes_housing_loan_credit() {
        let deductions = Deductions {
            basic: dec!(480000),
            housing_loan: dec!(200000),
            ..Deductions::default()
        };

        assert_eq!(total_deductions(&deductions), dec!(480000));
    }

    #[test]
    fn total_deductions_ignores_dependent_count() {
        let deductions = Deductions {
            dependent: dec!(380000),
            dependent_count: 7,
            ..Deductions::default()
        };

        assert_eq!(total_deductions(&deductions), dec!(380000));
    }
}
