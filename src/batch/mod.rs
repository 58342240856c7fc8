//! Batch status calculation, mutation, and orchestration.
//!
//! - [`BatchStatusCalculator`]: aggregates download statuses into a batch status
//! - [`BatchMutator`]: single-statement status writes
//! - [`BatchStatusRepository`]: the public operations, composed from the two above

mod calculator;
mod mutator;
mod repository;

pub use calculator::{BatchStatusCalculator, aggregate_status};
pub use mutator::BatchMutator;
pub use repository::BatchStatusRepository;
