//! Statutory bracket tables for the employment income deduction and the
//! progressive income tax.
//!
//! # Employment income deduction
//!
//! | Range (yen)                 | Deduction                 |
//! |-----------------------------|---------------------------|
//! | 0 – 1,625,000               | 550,000                   |
//! | 1,625,000 – 1,800,000       | income × 40% − 100,000    |
//! | 1,800,000 – 3,600,000       | income × 30% + 80,000     |
//! | 3,600,000 – 6,600,000       | income × 20% + 440,000    |
//! | 6,600,000 – 8,500,000       | income × 10% + 1,100,000  |
//! | 8,500,000 and above         | 1,950,000                 |
//!
//! # Income tax rates
//!
//! | Taxable income (yen)        | Rate | Subtracted |
//! |-----------------------------|------|------------|
//! | 0 – 1,950,000               | 5%   | 0          |
//! | 1,950,000 – 3,300,000       | 10%  | 97,500     |
//! | 3,300,000 – 6,950,000       | 20%  | 427,500    |
//! | 6,950,000 – 9,000,000       | 23%  | 636,000    |
//! | 9,000,000 – 18,000,000      | 33%  | 1,536,000  |
//! | 18,000,000 – 40,000,000     | 40%  | 2,796,000  |
//! | 40,000,000 and above        | 45%  | 4,796,000  |
//!
//! Every range is half-open: the lower bound belongs to the range, the
//! upper bound to the next one.

use rust_decimal::Decimal;

use crate::calculations::common::{floor_yen, percent};
use crate::models::{BracketTable, Tier};

/// Deduction formula attached to one employment income range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmploymentIncomeFormula {
    /// A fixed deduction regardless of income.
    Flat(i64),

    /// `floor(income × rate_percent% + adjustment)`.
    Linear { rate_percent: i64, adjustment: i64 },
}

impl EmploymentIncomeFormula {
    /// Evaluates the formula for the given total income.
    pub fn apply(
        &self,
        income: Decimal,
    ) -> Decimal {
        match *self {
            Self::Flat(amount) => Decimal::from(amount),
            Self::Linear {
                rate_percent,
                adjustment,
            } => floor_yen(income * percent(rate_percent) + Decimal::from(adjustment)),
        }
    }
}

/// Marginal rate and subtracted constant for one taxable income range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxRate {
    pub rate_percent: i64,
    pub subtracted: i64,
}

impl TaxRate {
    /// `floor(taxable_income × rate − subtracted)`.
    pub fn apply(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        floor_yen(taxable_income * percent(self.rate_percent) - Decimal::from(self.subtracted))
    }
}

pub type EmploymentIncomeDeductionTable = BracketTable<'static, EmploymentIncomeFormula>;
pub type IncomeTaxRateTable = BracketTable<'static, TaxRate>;

const EMPLOYMENT_INCOME_TIERS: &[Tier<EmploymentIncomeFormula>] = &[
    Tier {
        upper: 1_625_000,
        value: EmploymentIncomeFormula::Flat(550_000),
    },
    Tier {
        upper: 1_800_000,
        value: EmploymentIncomeFormula::Linear {
            rate_percent: 40,
            adjustment: -100_000,
        },
    },
    Tier {
        upper: 3_600_000,
        value: EmploymentIncomeFormula::Linear {
            rate_percent: 30,
            adjustment: 80_000,
        },
    },
    Tier {
        upper: 6_600_000,
        value: EmploymentIncomeFormula::Linear {
            rate_percent: 20,
            adjustment: 440_000,
        },
    },
    Tier {
        upper: 8_500_000,
        value: EmploymentIncomeFormula::Linear {
            rate_percent: 10,
            adjustment: 1_100_000,
        },
    },
];

pub static EMPLOYMENT_INCOME_DEDUCTION_TABLE: EmploymentIncomeDeductionTable =
    BracketTable::new_unchecked(
        EMPLOYMENT_INCOME_TIERS,
        EmploymentIncomeFormula::Flat(1_950_000),
    );

const INCOME_TAX_TIERS: &[Tier<TaxRate>] = &[
    Tier {
        upper: 1_950_000,
        value: TaxRate {
            rate_percent: 5,
            subtracted: 0,
        },
    },
    Tier {
        upper: 3_300_000,
        value: TaxRate {
            rate_percent: 10,
            subtracted: 97_500,
        },
    },
    Tier {
        upper: 6_950_000,
        value: TaxRate {
            rate_percent: 20,
            subtracted: 427_500,
        },
    },
    Tier {
        upper: 9_000_000,
        value: TaxRate {
            rate_percent: 23,
            subtracted: 636_000,
        },
    },
    Tier {
        upper: 18_000_000,
        value: TaxRate {
            rate_percent: 33,
            subtracted: 1_536_000,
        },
    },
    Tier {
        upper: 40_000_000,
        value: TaxRate {
            rate_percent: 40,
            subtracted: 2_796_000,
        },
    },
];

pub static INCOME_TAX_RATE_TABLE: IncomeTaxRateTable = BracketTable::new_unchecked(
    INCOME_TAX_TIERS,
    TaxRate {
        rate_percent: 45,
        subtracted: 4_796_000,
    },
);
