pub mod calculations;
pub mod models;

pub use calculations::{ReconciliationError, reconcile, reconcile_validated};
pub use models::*;
