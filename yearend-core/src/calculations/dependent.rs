//! Dependent deduction.
//!
//! | Category                     | Per person |
//! |------------------------------|------------|
//! | General dependent            | 380,000    |
//! | Specified-age dependent      | 630,000    |
//! | Elderly dependent            | 480,000    |
//! | Co-residing elderly parent   | 580,000    |

use rust_decimal::Decimal;

use crate::calculations::validation::{ReconciliationError, validate_counts};
use crate::models::DependentCounts;

pub const GENERAL_DEPENDENT_DEDUCTION: i64 = 380_000;
pub const SPECIFIED_DEPENDENT_DEDUCTION: i64 = 630_000;
pub const ELDERLY_DEPENDENT_DEDUCTION: i64 = 480_000;
pub const ELDERLY_LIVING_DEPENDENT_DEDUCTION: i64 = 580_000;

/// Computes the dependent deduction from per-category head counts.
///
/// No caps apply and categories are not cross-checked.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use yearend_core::DependentCounts;
/// use yearend_core::calculations::dependent_deduction;
///
/// let counts = DependentCounts { general: 1, ..DependentCounts::default() };
///
/// assert_eq!(dependent_deduction(&counts), dec!(380000));
/// ```
pub fn dependent_deduction(counts: &DependentCounts) -> Decimal {
    let per_category = [
        (counts.general, GENERAL_DEPENDENT_DEDUCTION),
        (counts.specified, SPECIFIED_DEPENDENT_DEDUCTION),
        (counts.elderly, ELDERLY_DEPENDENT_DEDUCTION),
        (counts.elderly_living, ELDERLY_LIVING_DEPENDENT_DEDUCTION),
    ];

    per_category
        .iter()
        .map(|&(count, amount)| Decimal::from(count) * Decimal::from(amount))
        .sum()
}

/// Like [`dependent_deduction`], but rejects negative counts.
///
/// # Errors
///
/// Returns [`ReconciliationError::InvalidInput`] naming the first negative
/// category.
pub fn dependent_deduction_validated(
    counts: &DependentCounts
) -> Result<Decimal, ReconciliationError> {
    validate_counts(counts)?;
    Ok(dependent_deduction(counts))
}
