mod bracket_table;
mod dependent_counts;
mod reconciliation_input;
mod reconciliation_result;

pub use bracket_table::{BracketTable, BracketTableError, Tier};
pub use dependent_counts::DependentCounts;
pub use reconciliation_input::{Deductions, ReconciliationInput};
pub use reconciliation_result::{ReconciliationDetails, ReconciliationResult};
