//! CSV loader for batches of year-end reconciliation inputs.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Values are
//! trimmed and every row must have as many cells as the header.
//!
//! | Column                           | Required | Type    | Notes                          |
//! |----------------------------------|----------|---------|--------------------------------|
//! | `employee_id`                    | yes      | string  | Must not be blank              |
//! | `tax_year`                       | yes      | integer | e.g. `2024`                    |
//! | `base_compensation`              | yes      | decimal | Yen                            |
//! | `bonus_compensation`             | yes      | decimal | Yen                            |
//! | `withheld_tax`                   | yes      | decimal | Yen                            |
//! | `basic_deduction`                | yes      | decimal | Yen                            |
//! | `spouse_deduction`               | no       | decimal | Empty or absent means 0        |
//! | `spouse_special_deduction`       | no       | decimal | Empty or absent means 0        |
//! | `dependent_deduction`            | no       | decimal | Empty or absent means 0        |
//! | `dependent_count`                | no       | integer | Informational only             |
//! | `life_insurance_deduction`       | no       | decimal | Capped at 120,000              |
//! | `earthquake_insurance_deduction` | no       | decimal | Capped at 50,000               |
//! | `social_insurance_deduction`     | no       | decimal |                                |
//! | `housing_loan_deduction`         | no       | decimal | Credit against computed tax    |
//! | `medical_expense_deduction`      | no       | decimal | Capped at 2,000,000            |
//! | `other_deductions`               | no       | decimal |                                |
//! | `spouse_income`                  | no       | decimal | Derives the spouse pair        |
//! | `general_dependents`             | no       | integer | Derives the dependent amount   |
//! | `specified_dependents`           | no       | integer | Derives the dependent amount   |
//! | `elderly_dependents`             | no       | integer | Derives the dependent amount   |
//! | `elderly_living_dependents`      | no       | integer | Derives the dependent amount   |
//!
//! ### Derived deductions
//!
//! When both spouse columns are empty and `spouse_income` is given, the
//! spouse pair is computed from the employee's total income (base plus
//! bonus) and the spouse income.
//!
//! When `dependent_deduction` is empty and any of the four dependent count
//! columns is given, the deduction is computed from the counts, and an empty
//! `dependent_count` becomes their sum.
//!
//! ### Minimal example
//!
//! ```csv
//! employee_id,tax_year,base_compensation,bonus_compensation,withheld_tax,basic_deduction
//! E001,2024,5000000,1000000,300000,480000
//! ```

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use yearend_core::calculations::validation::validate_amount;
use yearend_core::calculations::{
    SpouseDeduction, dependent_deduction, dependent_deduction_validated, spouse_deduction,
    spouse_deduction_validated,
};
use yearend_core::{Deductions, DependentCounts, ReconciliationError, ReconciliationInput};

use crate::batch::ValidationMode;

/// Errors that can occur while reading a batch input file.
#[derive(Debug, Error)]
pub enum InputLoaderError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV is structurally invalid, a required column is missing, or a
    /// cell does not parse as its column type.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// A row parsed but cannot describe an employee. `row` is 1-based
    /// (header = row 0).
    #[error("invalid row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },
}

/// One data row of the batch input file, as written.
///
/// Optional columns stay `None` until [`InputRecord::to_input`] decides
/// whether to default them to zero or derive them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InputRecord {
    pub employee_id: String,
    pub tax_year: i32,
    pub base_compensation: Decimal,
    pub bonus_compensation: Decimal,
    pub withheld_tax: Decimal,
    pub basic_deduction: Decimal,
    #[serde(default)]
    pub spouse_deduction: Option<Decimal>,
    #[serde(default)]
    pub spouse_special_deduction: Option<Decimal>,
    #[serde(default)]
    pub dependent_deduction: Option<Decimal>,
    #[serde(default)]
    pub dependent_count: Option<i32>,
    #[serde(default)]
    pub life_insurance_deduction: Option<Decimal>,
    #[serde(default)]
    pub earthquake_insurance_deduction: Option<Decimal>,
    #[serde(default)]
    pub social_insurance_deduction: Option<Decimal>,
    #[serde(default)]
    pub housing_loan_deduction: Option<Decimal>,
    #[serde(default)]
    pub medical_expense_deduction: Option<Decimal>,
    #[serde(default)]
    pub other_deductions: Option<Decimal>,
    #[serde(default)]
    pub spouse_income: Option<Decimal>,
    #[serde(default)]
    pub general_dependents: Option<i32>,
    #[serde(default)]
    pub specified_dependents: Option<i32>,
    #[serde(default)]
    pub elderly_dependents: Option<i32>,
    #[serde(default)]
    pub elderly_living_dependents: Option<i32>,
}

impl InputRecord {
    /// Builds the engine input, filling empty columns with zero and
    /// deriving the spouse and dependent amounts where requested.
    ///
    /// In [`ValidationMode::Strict`] the derivation inputs are checked the
    /// same way the engine checks its own inputs.
    ///
    /// # Errors
    ///
    /// Returns [`ReconciliationError::InvalidInput`] only in strict mode,
    /// when a derivation input is negative or fractional, or when the
    /// dependent counts sum past `i32::MAX`.
    pub fn to_input(
        &self,
        mode: ValidationMode,
    ) -> Result<ReconciliationInput, ReconciliationError> {
        let total_income = self.base_compensation + self.bonus_compensation;
        let spouse = self.spouse_pair(total_income, mode)?;
        let (dependent, dependent_count) = self.dependent_amount(mode)?;

        Ok(ReconciliationInput {
            employee_id: self.employee_id.clone(),
            tax_year: self.tax_year,
            base_compensation: self.base_compensation,
            bonus_compensation: self.bonus_compensation,
            withheld_tax: self.withheld_tax,
            deductions: Deductions {
                basic: self.basic_deduction,
                spouse: spouse.spouse_deduction,
                spouse_special: spouse.spouse_special_deduction,
                dependent,
                dependent_count,
                life_insurance: self.life_insurance_deduction.unwrap_or_default(),
                earthquake_insurance: self.earthquake_insurance_deduction.unwrap_or_default(),
                social_insurance: self.social_insurance_deduction.unwrap_or_default(),
                housing_loan: self.housing_loan_deduction.unwrap_or_default(),
                medical_expense: self.medical_expense_deduction.unwrap_or_default(),
                other: self.other_deductions.unwrap_or_default(),
            },
        })
    }

    /// The dependent counts, if any count column was filled in.
    pub fn dependent_counts(&self) -> Option<DependentCounts> {
        let columns = [
            self.general_dependents,
            self.specified_dependents,
            self.elderly_dependents,
            self.elderly_living_dependents,
        ];
        if columns.iter().all(Option::is_none) {
            return None;
        }

        Some(DependentCounts {
            general: self.general_dependents.unwrap_or_default(),
            specified: self.specified_dependents.unwrap_or_default(),
            elderly: self.elderly_dependents.unwrap_or_default(),
            elderly_living: self.elderly_living_dependents.unwrap_or_default(),
        })
    }

    fn spouse_pair(
        &self,
        total_income: Decimal,
        mode: ValidationMode,
    ) -> Result<SpouseDeduction, ReconciliationError> {
        match (
            self.spouse_deduction,
            self.spouse_special_deduction,
            self.spouse_income,
        ) {
            (None, None, Some(spouse_income)) => match mode {
                ValidationMode::Strict => {
                    validate_amount("base_compensation", self.base_compensation)?;
                    validate_amount("bonus_compensation", self.bonus_compensation)?;
                    spouse_deduction_validated(total_income, spouse_income)
                }
                ValidationMode::Permissive => Ok(spouse_deduction(total_income, spouse_income)),
            },
            (spouse, special, _) => Ok(SpouseDeduction {
                spouse_deduction: spouse.unwrap_or_default(),
                spouse_special_deduction: special.unwrap_or_default(),
            }),
        }
    }

    fn dependent_amount(
        &self,
        mode: ValidationMode,
    ) -> Result<(Decimal, i32), ReconciliationError> {
        match (self.dependent_deduction, self.dependent_counts()) {
            (None, Some(counts)) => {
                let amount = match mode {
                    ValidationMode::Strict => dependent_deduction_validated(&counts)?,
                    ValidationMode::Permissive => dependent_deduction(&counts),
                };
                let count = match self.dependent_count {
                    Some(count) => count,
                    None => derived_count(&counts, mode)?,
                };
                Ok((amount, count))
            }
            (amount, _) => Ok((
                amount.unwrap_or_default(),
                self.dependent_count.unwrap_or_default(),
            )),
        }
    }
}

/// Sum of the counts. Strict mode rejects a sum beyond `i32::MAX`;
/// permissive mode saturates.
fn derived_count(
    counts: &DependentCounts,
    mode: ValidationMode,
) -> Result<i32, ReconciliationError> {
    match (counts.checked_total(), mode) {
        (Some(total), _) => Ok(total),
        (None, ValidationMode::Strict) => Err(ReconciliationError::InvalidInput {
            field: "dependent_count",
            value: counts
                .named_counts()
                .iter()
                .map(|&(_, count)| Decimal::from(count))
                .sum(),
        }),
        (None, ValidationMode::Permissive) => {
            let total: i64 = counts
                .named_counts()
                .iter()
                .map(|&(_, count)| i64::from(count))
                .sum();
            Ok(i32::try_from(total).unwrap_or(if total < 0 { i32::MIN } else { i32::MAX }))
        }
    }
}

fn check_record(
    record: InputRecord,
    row: usize,
) -> Result<InputRecord, InputLoaderError> {
    if record.employee_id.is_empty() {
        return Err(InputLoaderError::InvalidRow {
            row,
            reason: "employee_id is empty".to_string(),
        });
    }
    Ok(record)
}

/// Parse CSV text and return the records in file order.
///
/// # Errors
///
/// * [`InputLoaderError::Parse`] if the CSV is structurally invalid or a
///   required field cannot be deserialised.
/// * [`InputLoaderError::InvalidRow`] if a row has a blank `employee_id`.
pub fn load_from_str(input: &str) -> Result<Vec<InputRecord>, InputLoaderError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<InputRecord>()
        .enumerate()
        .map(|(idx, result)| check_record(result?, idx + 1))
        .collect()
}

/// Read a file from disk and delegate to [`load_from_str`].
///
/// # Errors
///
/// Returns [`InputLoaderError::Read`] when the file cannot be read, or any
/// error of [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<InputRecord>, InputLoaderError> {
    let contents = std::fs::read_to_string(path).map_err(|source| InputLoaderError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents)
}
