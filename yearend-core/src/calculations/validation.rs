//! Input checks for the validated entry points.
//!
//! The permissive entry points accept any amount and let negative values
//! flow through the arithmetic. The `*_validated` variants run these checks
//! first and reject the input before any bracket lookup.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{DependentCounts, ReconciliationInput};

/// Errors returned by the validated reconciliation entry points.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReconciliationError {
    /// An amount was negative or not a whole yen value, or a count was
    /// negative.
    #[error("invalid input: {field} must be a non-negative whole number, got {value}")]
    InvalidInput { field: &'static str, value: Decimal },
}

/// Checks that `value` is a non-negative whole yen amount.
pub fn validate_amount(
    field: &'static str,
    value: Decimal,
) -> Result<Decimal, ReconciliationError> {
    if value < Decimal::ZERO || !value.fract().is_zero() {
        return Err(ReconciliationError::InvalidInput { field, value });
    }
    Ok(value)
}

/// Checks that `value` is a non-negative head count.
pub fn validate_count(
    field: &'static str,
    value: i32,
) -> Result<i32, ReconciliationError> {
    if value < 0 {
        return Err(ReconciliationError::InvalidInput {
            field,
            value: Decimal::from(value),
        });
    }
    Ok(value)
}

/// Checks every amount and count on a reconciliation input.
pub fn validate_input(input: &ReconciliationInput) -> Result<(), ReconciliationError> {
    validate_amount("base_compensation", input.base_compensation)?;
    validate_amount("bonus_compensation", input.bonus_compensation)?;
    validate_amount("withheld_tax", input.withheld_tax)?;
    for (field, amount) in input.deductions.named_amounts() {
        validate_amount(field, amount)?;
    }
    validate_count("dependent_count", input.deductions.dependent_count)?;
    Ok(())
}

/// Checks every category of a dependent head count.
pub fn validate_counts(counts: &DependentCounts) -> Result<(), ReconciliationError> {
    for (field, count) in counts.named_counts() {
        validate_count(field, count)?;
    }
    Ok(())
}
