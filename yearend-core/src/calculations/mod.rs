//! Calculation modules for the year-end tax adjustment.
//!
//! Every function here is pure: no I/O, no shared state, no clock reads.
//! Calls are independent and may run concurrently on any number of threads.

pub mod adjustment;
pub mod common;
pub mod deductions;
pub mod dependent;
pub mod spouse;
pub mod tables;
pub mod validation;
pub mod worksheets;

pub use adjustment::{Adjustment, apply_housing_loan_credit, resolve_adjustment};
pub use deductions::total_deductions;
pub use dependent::{dependent_deduction, dependent_deduction_validated};
pub use spouse::{SpouseDeduction, spouse_deduction, spouse_deduction_validated};
pub use tables::{
    EMPLOYMENT_INCOME_DEDUCTION_TABLE, EmploymentIncomeFormula, INCOME_TAX_RATE_TABLE, TaxRate,
};
pub use validation::ReconciliationError;
pub use worksheets::{
    YearEndWorksheet, employment_income_deduction, progressive_tax, reconcile,
    reconcile_validated,
};
