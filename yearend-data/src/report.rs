//! Writers for reconciliation results.

use std::io::Write;

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use yearend_core::ReconciliationResult;

/// Output formats accepted by the CLI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One flat row per employee.
    #[default]
    Csv,

    /// A pretty-printed JSON array of results.
    Json,
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON write error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A [`ReconciliationResult`] with its details flattened into columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow<'a> {
    pub employee_id: &'a str,
    pub tax_year: i32,
    pub total_income: Decimal,
    pub employment_income_deduction: Decimal,
    pub income_after_employment_deduction: Decimal,
    pub total_deductions: Decimal,
    pub taxable_income: Decimal,
    pub calculated_tax: Decimal,
    pub final_tax: Decimal,
    pub withheld_tax: Decimal,
    pub difference: Decimal,
    pub adjustment_amount: Decimal,
    pub is_refund: bool,
}

impl<'a> From<&'a ReconciliationResult> for ResultRow<'a> {
    fn from(result: &'a ReconciliationResult) -> Self {
        Self {
            employee_id: &result.employee_id,
            tax_year: result.tax_year,
            total_income: result.total_income,
            employment_income_deduction: result.employment_income_deduction,
            income_after_employment_deduction: result.income_after_employment_deduction,
            total_deductions: result.total_deductions,
            taxable_income: result.taxable_income,
            calculated_tax: result.details.calculated_tax,
            final_tax: result.final_tax,
            withheld_tax: result.details.withheld_tax,
            difference: result.details.difference,
            adjustment_amount: result.adjustment_amount,
            is_refund: result.is_refund,
        }
    }
}

/// Writes `results` in the requested format.
///
/// # Errors
///
/// Returns [`ReportError`] if serialisation or the underlying writer fails.
pub fn write_results<W: Write>(
    writer: W,
    format: OutputFormat,
    results: &[ReconciliationResult],
) -> Result<(), ReportError> {
    match format {
        OutputFormat::Csv => write_csv(writer, results),
        OutputFormat::Json => write_json(writer, results),
    }
}

/// Writes one header row and one [`ResultRow`] per result.
///
/// # Errors
///
/// Returns [`ReportError`] if serialisation or the underlying writer fails.
pub fn write_csv<W: Write>(
    writer: W,
    results: &[ReconciliationResult],
) -> Result<(), ReportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for result in results {
        csv_writer.serialize(ResultRow::from(result))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes the results as a pretty-printed JSON array followed by a newline.
///
/// # Errors
///
/// Returns [`ReportError`] if serialisation or the underlying writer fails.
pub fn write_json<W: Write>(
    mut writer: W,
    results: &[ReconciliationResult],
) -> Result<(), ReportError> {
    serde_json::to_writer_pretty(&mut writer, results)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use yearend_core::ReconciliationDetails;

    use super::*;

    fn sample_result() -> ReconciliationResult {
        ReconciliationResult {
            employee_id: "E001".to_string(),
            tax_year: 2024,
            total_income: dec!(7000000),
            employment_income_deduction: dec!(1800000),
            income_after_employment_deduction: dec!(5200000),
            total_deductions: dec!(1980000),
            taxable_income: dec!(3220000),
            final_tax: dec!(224500),
            adjustment_amount: dec!(475500),
            is_refund: true,
            details: ReconciliationDetails {
                calculated_tax: dec!(224500),
                withheld_tax: dec!(700000),
                difference: dec!(475500),
            },
        }
    }

    // =========================================================================
    // CSV tests
    // =========================================================================

    #[test]
    fn csv_has_header_and_flat_row() {
        let mut out = Vec::new();

        write_csv(&mut out, &[sample_result()]).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "employee_id,tax_year,total_income,employment_income_deduction,\
                 income_after_employment_deduction,total_deductions,taxable_income,\
                 calculated_tax,final_tax,withheld_tax,difference,adjustment_amount,is_refund",
                "E001,2024,7000000,1800000,5200000,1980000,3220000,224500,224500,700000,\
                 475500,475500,true",
            ]
        );
    }

    #[test]
    fn csv_for_no_results_is_empty() {
        let mut out = Vec::new();

        write_csv(&mut out, &[]).unwrap();

        assert!(out.is_empty());
    }

    // =========================================================================
    // JSON tests
    // =========================================================================

    #[test]
    fn json_round_trips_results() {
        let mut out = Vec::new();
        let results = vec![sample_result()];

        write_json(&mut out, &results).unwrap();

        let parsed: Vec<ReconciliationResult> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, results);
    }

    #[test]
    fn json_nests_details() {
        let mut out = Vec::new();

        write_results(&mut out, OutputFormat::Json, &[sample_result()]).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["employee_id"], "E001");
        assert_eq!(value[0]["is_refund"], true);
        assert!(value[0]["details"].get("difference").is_some());
    }
}
