//! Batch front end for the year-end worksheet: CSV input, batch runs and
//! result writers.

pub mod batch;
pub mod loader;
pub mod report;

pub use batch::{BatchError, BatchOutcome, BatchSummary, ValidationMode, run_batch};
pub use loader::{InputLoaderError, InputRecord, load_from_file, load_from_str};
pub use report::{OutputFormat, ReportError, write_results};
