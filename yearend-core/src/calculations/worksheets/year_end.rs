//! Year-end adjustment worksheet.
//!
//! Reconciles the income tax withheld during the year against the final
//! annual liability for one employee.
//!
//! # Worksheet Structure
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Total income (base pay + bonuses) |
//! | 2    | Employment income deduction (bracket lookup on step 1) |
//! | 3    | Income after employment deduction (step 1 − step 2) |
//! | 4    | Total itemized deductions (life insurance, earthquake insurance and medical expense capped) |
//! | 5    | Taxable income (step 3 − step 4, minimum 0) |
//! | 6    | Progressive tax (bracket lookup on step 5) |
//! | 7    | Final tax (step 6 − housing loan credit, minimum 0) |
//! | 8    | Difference (withheld tax − step 7); positive is a refund |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use yearend_core::{Deductions, ReconciliationInput};
//! use yearend_core::calculations::reconcile;
//!
//! let input = ReconciliationInput {
//!     employee_id: "E-1001".to_string(),
//!     tax_year: 2024,
//!     base_compensation: dec!(6000000),
//!     bonus_compensation: dec!(1000000),
//!     withheld_tax: dec!(700000),
//!     deductions: Deductions {
//!         basic: dec!(480000),
//!         spouse: dec!(380000),
//!         life_insurance: dec!(150000),
//!         social_insurance: dec!(1000000),
//!         ..Deductions::default()
//!     },
//! };
//!
//! let result = reconcile(&input);
//!
//! assert_eq!(result.employment_income_deduction, dec!(1800000));
//! assert_eq!(result.taxable_income, dec!(3220000));
//! assert_eq!(result.final_tax, dec!(224500));
//! assert!(result.is_refund);
//! assert_eq!(result.adjustment_amount, dec!(475500));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::adjustment::{apply_housing_loan_credit, resolve_adjustment};
use crate::calculations::common::max;
use crate::calculations::deductions::total_deductions;
use crate::calculations::tables::{
    EMPLOYMENT_INCOME_DEDUCTION_TABLE, EmploymentIncomeFormula, INCOME_TAX_RATE_TABLE, TaxRate,
};
use crate::calculations::validation::{ReconciliationError, validate_input};
use crate::models::{
    BracketTable, ReconciliationDetails, ReconciliationInput, ReconciliationResult,
};

/// Calculator for the year-end adjustment.
///
/// Holds the two bracket tables the worksheet reads. [`YearEndWorksheet::statutory`]
/// uses the published tables; [`YearEndWorksheet::new`] accepts others.
#[derive(Debug, Clone, Copy)]
pub struct YearEndWorksheet<'a> {
    employment_table: &'a BracketTable<'a, EmploymentIncomeFormula>,
    tax_table: &'a BracketTable<'a, TaxRate>,
}

impl YearEndWorksheet<'static> {
    /// Worksheet over the statutory tables.
    pub fn statutory() -> Self {
        Self::new(&EMPLOYMENT_INCOME_DEDUCTION_TABLE, &INCOME_TAX_RATE_TABLE)
    }
}

impl Default for YearEndWorksheet<'static> {
    fn default() -> Self {
        Self::statutory()
    }
}

impl<'a> YearEndWorksheet<'a> {
    pub fn new(
        employment_table: &'a BracketTable<'a, EmploymentIncomeFormula>,
        tax_table: &'a BracketTable<'a, TaxRate>,
    ) -> Self {
        Self {
            employment_table,
            tax_table,
        }
    }

    /// Runs the full worksheet without validating the input.
    ///
    /// Negative amounts are not rejected; they flow through the arithmetic.
    /// Use [`YearEndWorksheet::reconcile_validated`] to reject them.
    pub fn reconcile(
        &self,
        input: &ReconciliationInput,
    ) -> ReconciliationResult {
        // Steps 1-3
        let total_income = input.total_income();
        let employment_income_deduction = self.employment_income_deduction(total_income);
        let income_after_employment_deduction = total_income - employment_income_deduction;

        // Steps 4-5
        let total_deductions = total_deductions(&input.deductions);
        let taxable_income =
            self.taxable_income(income_after_employment_deduction, total_deductions);

        // Steps 6-7
        let calculated_tax = self.calculate_tax(taxable_income);
        let final_tax = apply_housing_loan_credit(calculated_tax, input.deductions.housing_loan);

        // Step 8
        let adjustment = resolve_adjustment(input.withheld_tax, final_tax);

        debug!(
            employee_id = %input.employee_id,
            tax_year = input.tax_year,
            taxable_income = %taxable_income,
            final_tax = %final_tax,
            difference = %adjustment.difference,
            "year-end adjustment computed"
        );

        ReconciliationResult {
            employee_id: input.employee_id.clone(),
            tax_year: input.tax_year,
            total_income,
            employment_income_deduction,
            income_after_employment_deduction,
            total_deductions,
            taxable_income,
            final_tax,
            adjustment_amount: adjustment.amount,
            is_refund: adjustment.is_refund,
            details: ReconciliationDetails {
                calculated_tax,
                withheld_tax: input.withheld_tax,
                difference: adjustment.difference,
            },
        }
    }

    /// Runs the full worksheet after checking that every amount is a
    /// non-negative whole yen value and the dependent count is non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`ReconciliationError::InvalidInput`] for the first field that
    /// fails the check. No bracket lookup runs in that case.
    pub fn reconcile_validated(
        &self,
        input: &ReconciliationInput,
    ) -> Result<ReconciliationResult, ReconciliationError> {
        validate_input(input)?;
        Ok(self.reconcile(input))
    }

    /// Employment income deduction for the given total income, floored to
    /// whole yen.
    pub fn employment_income_deduction(
        &self,
        total_income: Decimal,
    ) -> Decimal {
        self.employment_table
            .lookup(total_income)
            .apply(total_income)
    }

    /// Progressive income tax on the given taxable income, floored to whole
    /// yen.
    pub fn calculate_tax(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        self.tax_table.lookup(taxable_income).apply(taxable_income)
    }

    /// Income after deductions, never below zero.
    fn taxable_income(
        &self,
        income_after_employment_deduction: Decimal,
        total_deductions: Decimal,
    ) -> Decimal {
        max(
            income_after_employment_deduction - total_deductions,
            Decimal::ZERO,
        )
    }
}

/// Reconciles one employee's year with the statutory tables.
pub fn reconcile(input: &ReconciliationInput) -> ReconciliationResult {
    YearEndWorksheet::statutory().reconcile(input)
}

/// Validated variant of [`reconcile`].
///
/// # Errors
///
/// See [`YearEndWorksheet::reconcile_validated`].
pub fn reconcile_validated(
    input: &ReconciliationInput
) -> Result<ReconciliationResult, ReconciliationError> {
    YearEndWorksheet::statutory().reconcile_validated(input)
}

/// Statutory employment income deduction.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use yearend_core::calculations::employment_income_deduction;
///
/// assert_eq!(employment_income_deduction(dec!(5000000)), dec!(1440000));
/// ```
pub fn employment_income_deduction(total_income: Decimal) -> Decimal {
    YearEndWorksheet::statutory().employment_income_deduction(total_income)
}

/// Statutory progressive income tax.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use yearend_core::calculations::progressive_tax;
///
/// assert_eq!(progressive_tax(dec!(4000000)), dec!(372500));
/// ```
pub fn progressive_tax(taxable_income: Decimal) -> Decimal {
    YearEndWorksheet::statutory().calculate_tax(taxable_income)
}
