use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Annual figures for one employee, as supplied by the payroll records.
///
/// All amounts are whole yen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationInput {
    pub employee_id: String,
    pub tax_year: i32,

    /// Annual base pay.
    pub base_compensation: Decimal,

    /// Annual bonuses.
    pub bonus_compensation: Decimal,

    /// Income tax withheld from pay during the year.
    pub withheld_tax: Decimal,

    pub deductions: Deductions,
}

impl ReconciliationInput {
    /// Base pay plus bonuses.
    pub fn total_income(&self) -> Decimal {
        self.base_compensation + self.bonus_compensation
    }
}

/// Itemized deductions claimed for the year.
///
/// `housing_loan` is a tax credit applied after the progressive tax is
/// computed, not an income deduction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deductions {
    pub basic: Decimal,
    pub spouse: Decimal,
    pub spouse_special: Decimal,
    pub dependent: Decimal,

    /// Informational only; not used in any calculation.
    pub dependent_count: i32,

    pub life_insurance: Decimal,
    pub earthquake_insurance: Decimal,
    pub social_insurance: Decimal,
    pub housing_loan: Decimal,
    pub medical_expense: Decimal,
    pub other: Decimal,
}

impl Deductions {
    /// Field name and amount for every monetary field, in declaration order.
    pub fn named_amounts(&self) -> [(&'static str, Decimal); 10] {
        [
            ("basic", self.basic),
            ("spouse", self.spouse),
            ("spouse_special", self.spouse_special),
            ("dependent", self.dependent),
            ("life_insurance", self.life_insurance),
            ("earthquake_insurance", self.earthquake_insurance),
            ("social_insurance", self.social_insurance),
            ("housing_loan", self.housing_loan),
            ("medical_expense", self.medical_expense),
            ("other", self.other),
        ]
    }
}
