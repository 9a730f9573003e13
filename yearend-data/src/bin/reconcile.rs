use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use yearend_data::{OutputFormat, ValidationMode, load_from_file, run_batch, write_results};

/// Run the year-end tax adjustment for every employee in a CSV file.
///
/// Required columns: employee_id, tax_year, base_compensation,
/// bonus_compensation, withheld_tax, basic_deduction. Every other deduction
/// column is optional and defaults to 0.
#[derive(Parser, Debug)]
#[command(name = "yearend-reconcile")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing one row per employee
    #[arg(short, long)]
    file: PathBuf,

    /// Where to write results (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Reject negative or fractional amounts and stop at the first bad row
    #[arg(long, default_value_t = false)]
    strict: bool,
}

/// Logs go to stderr so stdout carries only results.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();

    info!(file = %args.file.display(), "loading inputs");
    let records = load_from_file(&args.file)
        .with_context(|| format!("Failed to load inputs: {}", args.file.display()))?;
    info!(rows = records.len(), "parsed input records");

    let mode = if args.strict {
        ValidationMode::Strict
    } else {
        ValidationMode::Permissive
    };
    let outcome = run_batch(&records, mode).context("Reconciliation aborted")?;

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create: {}", path.display()))?;
            write_results(BufWriter::new(file), args.format, &outcome.results)
                .with_context(|| format!("Failed to write results: {}", path.display()))?;
            info!(path = %path.display(), "results written");
        }
        None => write_results(io::stdout().lock(), args.format, &outcome.results)
            .context("Failed to write results to stdout")?,
    }

    Ok(())
}
