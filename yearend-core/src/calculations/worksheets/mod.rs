//! Year-end adjustment worksheet implementation.
//!
//! This module composes the calculation units into the full reconciliation
//! for one employee.

pub mod year_end;

pub use year_end::{
    YearEndWorksheet, employment_income_deduction, progressive_tax, reconcile,
    reconcile_validated,
};
