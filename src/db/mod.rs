//! Database layer for batch-status
//!
//! Handles SQLite persistence for batches and their downloads.
//!
//! ## Submodules
//!
//! Methods on [`Database`] are organized by domain:
//! - [`migrations`] — Database lifecycle, schema migrations
//! - [`batches`] — Batch rows: lookup, insert, filtered status writes
//! - [`downloads`] — Download rows: lookup, insert, filtered status writes
//! - [`store`] — [`BatchStore`](crate::store::BatchStore) implementation

use sqlx::sqlite::SqlitePool;

mod batches;
mod downloads;
mod migrations;
mod store;

/// SQLite's default `SQLITE_MAX_VARIABLE_NUMBER` is 999 on older builds;
/// stay under it with room for the non-id parameters.
const MAX_IDS_PER_STATEMENT: usize = 900;

/// Database handle for batch-status
pub struct Database {
    pool: SqlitePool,
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;
