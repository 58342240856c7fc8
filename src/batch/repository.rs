//! Public entry point for reading, recomputing, and cascading batch status.

use std::sync::Arc;

use crate::clock::Clock;
use crate::status::DownloadStatus;
use crate::store::BatchStore;
use crate::types::{BatchId, DownloadId};
use crate::{Error, Result};

use super::calculator::BatchStatusCalculator;
use super::mutator::BatchMutator;

/// Reads, recomputes, and writes batch status on behalf of callers
///
/// Holds no state between calls beyond its store and clock handles; several
/// repositories can share one store. Errors from the store are returned as-is
/// and nothing is retried.
///
/// # Ordering
///
/// [`cancel_batch`](Self::cancel_batch) writes the downloads first and the
/// batch row second, as two separate statements. An observer that reads item
/// status before batch status never sees a cancelled batch with live items.
/// If the first statement fails the second is not attempted.
pub struct BatchStatusRepository<S, C> {
    store: Arc<S>,
    calculator: BatchStatusCalculator<S>,
    mutator: BatchMutator<S, C>,
}

impl<S: BatchStore, C: Clock> BatchStatusRepository<S, C> {
    /// Create a repository that owns its store
    pub fn new(store: S, clock: C) -> Self {
        Self::with_shared_store(Arc::new(store), clock)
    }

    /// Create a repository over a store shared with other components
    pub fn with_shared_store(store: Arc<S>, clock: C) -> Self {
        Self {
            calculator: BatchStatusCalculator::new(Arc::clone(&store)),
            mutator: BatchMutator::new(Arc::clone(&store), clock),
            store,
        }
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Cached status of a batch, exactly as last written
    ///
    /// Does not look at the batch's downloads.
    pub async fn get_batch_status(&self, batch_id: BatchId) -> Result<DownloadStatus> {
        self.store
            .batch_status(batch_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("batch {}", batch_id)))
    }

    /// Aggregate status of a batch's downloads, without writing it
    pub async fn calculate_batch_status_from_downloads(
        &self,
        batch_id: BatchId,
    ) -> Result<DownloadStatus> {
        self.calculator.calculate_batch_status(batch_id).await
    }

    /// Write a batch's status, stamped with the current time
    pub async fn update_batch_status(&self, batch_id: BatchId, status: DownloadStatus) -> Result<u64> {
        self.mutator.write_batch_status(batch_id, status).await
    }

    /// Recompute a batch's status from its downloads and write it
    pub async fn refresh_batch_status(&self, batch_id: BatchId) -> Result<DownloadStatus> {
        let status = self.calculate_batch_status_from_downloads(batch_id).await?;
        self.update_batch_status(batch_id, status).await?;
        Ok(status)
    }

    /// Mark every download in the batch cancelled; the batch row is untouched
    pub async fn set_batch_items_cancelled(&self, batch_id: BatchId) -> Result<u64> {
        self.mutator
            .write_items_status_for_batch(batch_id, DownloadStatus::Canceled, None)
            .await
    }

    /// Cancel the downloads, then the batch
    ///
    /// Returns the number of downloads cancelled.
    pub async fn cancel_batch(&self, batch_id: BatchId) -> Result<u64> {
        let cancelled = self.set_batch_items_cancelled(batch_id).await?;
        self.update_batch_status(batch_id, DownloadStatus::Canceled).await?;

        tracing::info!(batch_id = %batch_id, downloads = cancelled, "batch cancelled");
        Ok(cancelled)
    }

    /// Mark every sibling of a failed download as [`DownloadStatus::BatchFailed`]
    ///
    /// The triggering download keeps its own error status.
    pub async fn set_batch_items_failed(
        &self,
        batch_id: BatchId,
        failed_download: DownloadId,
    ) -> Result<u64> {
        let rows = self
            .mutator
            .write_items_status_for_batch(
                batch_id,
                DownloadStatus::BatchFailed,
                Some(failed_download),
            )
            .await?;

        tracing::info!(
            batch_id = %batch_id,
            failed_download = %failed_download,
            siblings = rows,
            "propagated download failure to batch"
        );
        Ok(rows)
    }

    /// Reset every listed batch to [`DownloadStatus::Pending`]
    ///
    /// Ids with no matching batch are skipped silently.
    pub async fn update_batch_to_pending_status(&self, batch_ids: &[BatchId]) -> Result<u64> {
        let rows = self
            .mutator
            .write_batch_status_for_ids(batch_ids, DownloadStatus::Pending)
            .await?;

        tracing::info!(
            requested = batch_ids.len(),
            reset = rows,
            "reset batches to pending"
        );
        Ok(rows)
    }
}
