//! Integration tests that run the loader, batch runner and CLI against an
//! on-disk fixture file.

use std::path::PathBuf;
use std::process::Command;

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use yearend_core::ReconciliationResult;
use yearend_data::{BatchSummary, ValidationMode, load_from_file, run_batch};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("sample_inputs.csv")
}

fn fixture_results() -> Vec<ReconciliationResult> {
    let records = load_from_file(&fixture_path()).expect("fixture file should load");
    run_batch(&records, ValidationMode::Strict)
        .expect("fixture rows are valid")
        .results
}

fn by_id<'a>(
    results: &'a [ReconciliationResult],
    id: &str,
) -> &'a ReconciliationResult {
    results
        .iter()
        .find(|r| r.employee_id == id)
        .unwrap_or_else(|| panic!("no result for {id}"))
}

// =============================================================================
// loader + batch tests
// =============================================================================

#[test]
fn fixture_loads_every_row() {
    let records = load_from_file(&fixture_path()).unwrap();

    assert_eq!(records.len(), 6);
}

#[test]
fn standard_refund() {
    let results = fixture_results();
    let r = by_id(&results, "E001");

    assert_eq!(r.total_income, dec!(7000000));
    assert_eq!(r.employment_income_deduction, dec!(1800000));
    assert_eq!(r.income_after_employment_deduction, dec!(5200000));
    assert_eq!(r.total_deductions, dec!(1980000));
    assert_eq!(r.taxable_income, dec!(3220000));
    assert_eq!(r.final_tax, dec!(224500));
    assert_eq!(r.adjustment_amount, dec!(475500));
    assert!(r.is_refund);
}

#[test]
fn standard_additional_payment() {
    let results = fixture_results();
    let r = by_id(&results, "E002");

    assert_eq!(r.final_tax, dec!(224500));
    assert_eq!(r.details.difference, dec!(-24500));
    assert_eq!(r.adjustment_amount, dec!(24500));
    assert!(!r.is_refund);
}

#[test]
fn insurance_caps_apply() {
    let results = fixture_results();
    let r = by_id(&results, "E003");

    // 480,000 + min(200,000, 120,000) + min(80,000, 50,000) + 900,000
    assert_eq!(r.total_deductions, dec!(1550000));
    assert_eq!(r.taxable_income, dec!(2810000));
    assert_eq!(r.final_tax, dec!(183500));
    assert_eq!(r.adjustment_amount, dec!(66500));
    assert!(r.is_refund);
}

#[test]
fn derived_spouse_special_deduction() {
    let results = fixture_results();
    let r = by_id(&results, "E004");

    assert_eq!(r.employment_income_deduction, dec!(1950000));
    // 480,000 + 1,000,000 + 360,000 × 0.33
    assert_eq!(r.total_deductions, dec!(1598800));
    assert_eq!(r.taxable_income, dec!(5651200));
    assert_eq!(r.final_tax, dec!(702740));
    assert_eq!(r.adjustment_amount, dec!(102740));
    assert!(!r.is_refund);
}

#[test]
fn derived_dependents_and_housing_credit() {
    let results = fixture_results();
    let r = by_id(&results, "E005");

    // 480,000 + 700,000 + 380,000 + 630,000
    assert_eq!(r.total_deductions, dec!(2190000));
    assert_eq!(r.details.calculated_tax, dec!(68500));
    assert_eq!(r.final_tax, dec!(0));
    assert_eq!(r.adjustment_amount, dec!(300000));
    assert!(r.is_refund);
}

#[test]
fn low_income_balances_at_zero() {
    let results = fixture_results();
    let r = by_id(&results, "E006");

    assert_eq!(r.employment_income_deduction, dec!(550000));
    assert_eq!(r.taxable_income, dec!(0));
    assert_eq!(r.final_tax, dec!(0));
    assert_eq!(r.adjustment_amount, dec!(0));
    assert!(!r.is_refund);
}

#[test]
fn fixture_summary() {
    let records = load_from_file(&fixture_path()).unwrap();
    let outcome = run_batch(&records, ValidationMode::Permissive).unwrap();

    assert_eq!(
        outcome.summary,
        BatchSummary {
            rows: 6,
            refund_count: 3,
            refund_total: dec!(842000),
            additional_count: 3,
            additional_total: dec!(127240),
        }
    );
}

#[test]
fn rerunning_the_batch_gives_identical_results() {
    assert_eq!(fixture_results(), fixture_results());
}

// =============================================================================
// CLI tests
// =============================================================================

#[test]
fn cli_writes_json_to_stdout() {
    let output = Command::new(env!("CARGO_BIN_EXE_yearend-reconcile"))
        .arg("--file")
        .arg(fixture_path())
        .args(["--format", "json", "--strict"])
        .env("RUST_LOG", "off")
        .output()
        .expect("binary should run");

    assert!(output.status.success());
    let results: Vec<ReconciliationResult> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(results, fixture_results());
}

#[test]
fn cli_writes_csv_to_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("results.csv");

    let status = Command::new(env!("CARGO_BIN_EXE_yearend-reconcile"))
        .arg("--file")
        .arg(fixture_path())
        .arg("--output")
        .arg(&out_path)
        .env("RUST_LOG", "off")
        .status()
        .expect("binary should run");

    assert!(status.success());
    let contents = std::fs::read_to_string(&out_path).unwrap();
    let lines: Vec<_> = contents.lines().collect();
    assert_eq!(lines.len(), 7);
    assert!(lines[0].starts_with("employee_id,tax_year,total_income,"));
    assert!(lines[1].starts_with("E001,2024,7000000,1800000,5200000,"));
    assert!(lines[1].ends_with(",475500,true"));
}

#[test]
fn cli_strict_mode_fails_on_invalid_row() {
    let dir = tempfile::tempdir().unwrap();
    let in_path = dir.path().join("bad.csv");
    std::fs::write(
        &in_path,
        "employee_id,tax_year,base_compensation,bonus_compensation,withheld_tax,basic_deduction\n\
         E001,2024,5000000,0,-1,480000\n",
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_yearend-reconcile"))
        .arg("--file")
        .arg(&in_path)
        .arg("--strict")
        .env("RUST_LOG", "off")
        .output()
        .expect("binary should run");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("withheld_tax"));
}
