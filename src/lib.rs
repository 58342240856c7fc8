//! # batch-status
//!
//! Batch status aggregation and persistence for download managers.
//!
//! Downloads are grouped into batches. A batch's status is a cached value
//! derived from its items' statuses; this crate computes that value, writes
//! it, and applies the bulk transitions (cancel, fail-propagation, pending
//! reset) that touch a batch and its items in a fixed order.
//!
//! ## Layout
//!
//! - [`status`] — the status code space and its classification table
//! - [`store`] — the persisted store boundary and its filter predicates
//! - [`db`] — SQLite implementation of the store
//! - [`batch`] — calculator, mutator, and the public [`BatchStatusRepository`]
//!
//! ## Quick Start
//!
//! ```no_run
//! use batch_status::{BatchId, Config, DownloadStatus};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repository = batch_status::open(&Config::default()).await?;
//!
//!     let batch = BatchId(1);
//!     let status = repository.calculate_batch_status_from_downloads(batch).await?;
//!     repository.update_batch_status(batch, status).await?;
//!
//!     if status == DownloadStatus::Running {
//!         repository.cancel_batch(batch).await?;
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Batch status calculation, mutation, and orchestration
pub mod batch;
/// Time source used for `last_modified` stamps
pub mod clock;
/// Configuration types
pub mod config;
/// SQLite persistence layer
pub mod db;
/// Error types
pub mod error;
/// Status codes and their classification
pub mod status;
/// Store boundary and filter predicates
pub mod store;
/// Identifiers and row types
pub mod types;

// Re-export commonly used types
pub use batch::{BatchMutator, BatchStatusCalculator, BatchStatusRepository, aggregate_status};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Config, PersistenceConfig};
pub use db::Database;
pub use error::{DatabaseError, Error, Result};
pub use status::{DownloadStatus, StatusClass};
pub use store::{BatchFilter, BatchStore, DownloadFilter};
pub use types::{Batch, BatchId, DownloadId, DownloadItem, NewBatch, NewDownload};

/// Open a repository over the SQLite database named in `config`.
///
/// Migrations run on open. Writes are stamped with the wall clock.
///
/// # Example
///
/// ```no_run
/// use batch_status::{BatchId, Config};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let repository = batch_status::open(&Config::default()).await?;
/// let status = repository.get_batch_status(BatchId(7)).await?;
/// println!("batch 7 is {status}");
/// # Ok(())
/// # }
/// ```
pub async fn open(config: &Config) -> Result<BatchStatusRepository<Database, SystemClock>> {
    let db = Database::from_config(&config.persistence).await?;
    tracing::info!(
        path = %config.persistence.database_path.display(),
        "batch status store opened"
    );
    Ok(BatchStatusRepository::new(db, SystemClock))
}
