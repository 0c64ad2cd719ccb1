//! Progressive income tax calculations.
//!
//! Leaf modules first: `allowance` holds the capping rules, `brackets` the
//! marginal calculation and `withholding` the final reconciliation.
//! `engine` chains them for one taxpayer and `batch` repeats that over CSV
//! rows.

pub mod allowance;
pub mod batch;
pub mod brackets;
pub mod common;
pub mod engine;
mod error;
pub mod withholding;

pub use batch::calculate_batch;
pub use brackets::{BracketSchedule, BracketTax};
pub use engine::{TaxCalculator, load_settings};
pub use error::TaxCalculationError;
pub use withholding::{Reconciliation, reconcile, validate_withholding};
