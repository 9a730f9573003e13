use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Outcome of a year-end reconciliation for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationResult {
    pub employee_id: String,
    pub tax_year: i32,

    /// Base pay plus bonuses.
    pub total_income: Decimal,

    pub employment_income_deduction: Decimal,

    /// Total income minus the employment income deduction. Not floored.
    pub income_after_employment_deduction: Decimal,

    /// Sum of itemized deductions after caps (housing loan excluded).
    pub total_deductions: Decimal,

    /// Income the progressive rates apply to, never below zero.
    pub taxable_income: Decimal,

    /// Annual tax after the housing loan credit, never below zero.
    pub final_tax: Decimal,

    /// Magnitude of the refund or additional payment.
    pub adjustment_amount: Decimal,

    /// `true` when withholding exceeded the final tax. A zero difference is
    /// reported as a zero additional payment, not a refund.
    pub is_refund: bool,

    pub details: ReconciliationDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationDetails {
    /// Progressive tax before the housing loan credit.
    pub calculated_tax: Decimal,

    pub withheld_tax: Decimal,

    /// `withheld_tax - final_tax`, signed.
    pub difference: Decimal,
}
