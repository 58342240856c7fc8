//! Error types for batch-status
//!
//! Two failure kinds reach callers of the repository: a single-id read that
//! found no row ([`Error::NotFound`]), and a store that could not run the
//! statement ([`Error::Database`]). Nothing is retried here; retry policy
//! belongs to the caller.

use crate::types::BatchId;
use thiserror::Error;

/// Result type alias for batch-status operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for batch-status
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "database_path")
        key: Option<String>,
    },

    /// Database operation failed
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    /// A single-id lookup matched no row
    #[error("not found: {0}")]
    NotFound(String),

    /// Status was requested for a batch that has no downloads
    #[error("batch {0} has no downloads")]
    EmptyBatch(BatchId),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error is a missing row
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Whether the backing store could not be reached
    pub fn is_store_unavailable(&self) -> bool {
        matches!(
            self,
            Error::Database(DatabaseError::ConnectionFailed(_) | DatabaseError::Unavailable(_))
        )
    }
}

/// Database-related errors
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to open the database
    #[error("failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// The pool is closed, timed out, or the connection broke mid-statement
    #[error("database unavailable: {0}")]
    Unavailable(String),

    /// Failed to run migrations
    #[error("failed to run migrations: {0}")]
    MigrationFailed(String),

    /// Query failed
    #[error("query failed: {0}")]
    QueryFailed(String),
}

impl DatabaseError {
    /// Classify a sqlx failure, prefixing the message with `context`.
    pub(crate) fn from_sqlx(context: &str, e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => {
                DatabaseError::Unavailable(format!("{}: {}", context, e))
            }
            other => DatabaseError::QueryFailed(format!("{}: {}", context, other)),
        }
    }
}
