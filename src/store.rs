//! Store boundary for batch and item status.
//!
//! The repository never issues SQL itself. It talks to a [`BatchStore`] with
//! point reads and filtered bulk writes; the filters are small value types so
//! the same write path serves "every item in the batch", "every item but the
//! one that failed", and "every batch in this set".

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::Result;
use crate::status::DownloadStatus;
use crate::types::{BatchId, DownloadId};

/// Selects download rows for a bulk status write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadFilter {
    /// Every download whose `batch_id` matches
    AllInBatch(BatchId),
    /// Every download in the batch except one
    AllInBatchExcept {
        /// Owning batch
        batch_id: BatchId,
        /// Download left untouched
        except: DownloadId,
    },
}

impl DownloadFilter {
    /// Build the filter for a batch, optionally sparing one download
    pub fn for_batch(batch_id: BatchId, except: Option<DownloadId>) -> Self {
        match except {
            Some(except) => DownloadFilter::AllInBatchExcept { batch_id, except },
            None => DownloadFilter::AllInBatch(batch_id),
        }
    }

    /// The batch this filter is scoped to
    pub fn batch_id(&self) -> BatchId {
        match self {
            DownloadFilter::AllInBatch(batch_id)
            | DownloadFilter::AllInBatchExcept { batch_id, .. } => *batch_id,
        }
    }
}

/// Selects batch rows for a bulk status write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchFilter {
    /// A single batch
    Id(BatchId),
    /// Every batch whose id is in the set
    IdIn(Vec<BatchId>),
}

impl BatchFilter {
    /// Whether the filter can match nothing without asking the store
    pub fn is_empty(&self) -> bool {
        matches!(self, BatchFilter::IdIn(ids) if ids.is_empty())
    }
}

/// Persisted store of batches and their downloads
///
/// Each method is one logical statement against the store. Writes return the
/// number of rows they changed; zero is a valid outcome, not an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BatchStore: Send + Sync {
    /// Cached status of one batch, or `None` if the batch does not exist
    async fn batch_status(&self, batch_id: BatchId) -> Result<Option<DownloadStatus>>;

    /// Status of every download in the batch, ordered by download id
    async fn download_statuses(&self, batch_id: BatchId) -> Result<Vec<DownloadStatus>>;

    /// Set `status` on every download matched by `filter`
    async fn update_download_statuses(
        &self,
        filter: &DownloadFilter,
        status: DownloadStatus,
    ) -> Result<u64>;

    /// Set `status` and `last_modified` on every batch matched by `filter`
    async fn update_batch_statuses(
        &self,
        filter: &BatchFilter,
        status: DownloadStatus,
        modified_at: DateTime<Utc>,
    ) -> Result<u64>;
}
