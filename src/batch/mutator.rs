//! Status writes against batches and their downloads.

use std::sync::Arc;

use crate::Result;
use crate::clock::Clock;
use crate::status::DownloadStatus;
use crate::store::{BatchFilter, BatchStore, DownloadFilter};
use crate::types::{BatchId, DownloadId};

/// Issues the primitive status writes
///
/// Every write is a single filtered statement. Batch writes are stamped with
/// the clock's current instant; download rows carry no timestamp.
pub struct BatchMutator<S, C> {
    store: Arc<S>,
    clock: C,
}

impl<S: BatchStore, C: Clock> BatchMutator<S, C> {
    /// Create a mutator over a shared store
    pub fn new(store: Arc<S>, clock: C) -> Self {
        Self { store, clock }
    }

    /// Set one batch's status and `last_modified`
    pub async fn write_batch_status(&self, batch_id: BatchId, status: DownloadStatus) -> Result<u64> {
        let now = self.clock.now();
        let rows = self
            .store
            .update_batch_statuses(&BatchFilter::Id(batch_id), status, now)
            .await?;

        if rows == 0 {
            tracing::warn!(batch_id = %batch_id, status = %status, "batch status write matched no batch");
        } else {
            tracing::debug!(batch_id = %batch_id, status = %status, "wrote batch status");
        }

        Ok(rows)
    }

    /// Set the status of every download in a batch, optionally sparing one
    pub async fn write_items_status_for_batch(
        &self,
        batch_id: BatchId,
        status: DownloadStatus,
        except: Option<DownloadId>,
    ) -> Result<u64> {
        let filter = DownloadFilter::for_batch(batch_id, except);
        let rows = self.store.update_download_statuses(&filter, status).await?;

        tracing::debug!(
            batch_id = %batch_id,
            except = ?except,
            status = %status,
            rows,
            "wrote download statuses"
        );

        Ok(rows)
    }

    /// Set status and `last_modified` on every listed batch
    pub async fn write_batch_status_for_ids(
        &self,
        batch_ids: &[BatchId],
        status: DownloadStatus,
    ) -> Result<u64> {
        let filter = BatchFilter::IdIn(batch_ids.to_vec());
        if filter.is_empty() {
            return Ok(0);
        }

        let now = self.clock.now();
        let rows = self.store.update_batch_statuses(&filter, status, now).await?;

        tracing::debug!(
            batches = batch_ids.len(),
            status = %status,
            rows,
            "wrote batch statuses"
        );

        Ok(rows)
    }
}
