//! Runs the year-end worksheet over a batch of loaded records.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info};
use yearend_core::calculations::YearEndWorksheet;
use yearend_core::{ReconciliationError, ReconciliationResult};

use crate::loader::InputRecord;

/// How strictly a batch treats questionable amounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationMode {
    /// Negative or fractional amounts flow through the arithmetic.
    #[default]
    Permissive,

    /// The first negative or fractional amount aborts the batch.
    Strict,
}

/// Errors raised while running a batch.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchError {
    /// A row failed validation in strict mode. `row` is 1-based.
    #[error("row {row} (employee {employee_id}): {source}")]
    InvalidRow {
        row: usize,
        employee_id: String,
        #[source]
        source: ReconciliationError,
    },
}

/// Totals over a batch of results.
///
/// A zero difference counts as an additional payment of zero, the same way
/// a single result reports it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub rows: usize,
    pub refund_count: usize,
    pub refund_total: Decimal,
    pub additional_count: usize,
    pub additional_total: Decimal,
}

impl BatchSummary {
    pub fn from_results(results: &[ReconciliationResult]) -> Self {
        results.iter().fold(
            Self {
                rows: results.len(),
                ..Self::default()
            },
            |mut summary, result| {
                if result.is_refund {
                    summary.refund_count += 1;
                    summary.refund_total += result.adjustment_amount;
                } else {
                    summary.additional_count += 1;
                    summary.additional_total += result.adjustment_amount;
                }
                summary
            },
        )
    }
}

/// Results of a batch, in input order, with their totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub results: Vec<ReconciliationResult>,
    pub summary: BatchSummary,
}

/// Reconciles every record with the statutory tables.
///
/// # Errors
///
/// In [`ValidationMode::Strict`], returns [`BatchError::InvalidRow`] for the
/// first row that fails validation; no results are returned in that case.
/// Permissive batches never fail.
pub fn run_batch(
    records: &[InputRecord],
    mode: ValidationMode,
) -> Result<BatchOutcome, BatchError> {
    run_batch_with(&YearEndWorksheet::statutory(), records, mode)
}

/// Like [`run_batch`], with caller-supplied bracket tables.
///
/// # Errors
///
/// See [`run_batch`].
pub fn run_batch_with(
    worksheet: &YearEndWorksheet<'_>,
    records: &[InputRecord],
    mode: ValidationMode,
) -> Result<BatchOutcome, BatchError> {
    let results = records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            reconcile_record(worksheet, record, mode).map_err(|source| BatchError::InvalidRow {
                row: idx + 1,
                employee_id: record.employee_id.clone(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let summary = BatchSummary::from_results(&results);
    info!(
        rows = summary.rows,
        refund_count = summary.refund_count,
        refund_total = %summary.refund_total,
        additional_count = summary.additional_count,
        additional_total = %summary.additional_total,
        "batch reconciled"
    );

    Ok(BatchOutcome { results, summary })
}

fn reconcile_record(
    worksheet: &YearEndWorksheet<'_>,
    record: &InputRecord,
    mode: ValidationMode,
) -> Result<ReconciliationResult, ReconciliationError> {
    let input = record.to_input(mode)?;
    debug!(employee_id = %input.employee_id, ?mode, "reconciling row");
    match mode {
        ValidationMode::Strict => worksheet.reconcile_validated(&input),
        ValidationMode::Permissive => Ok(worksheet.reconcile(&input)),
    }
}
