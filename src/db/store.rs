//! [`BatchStore`] backed by SQLite.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::Result;
use crate::status::DownloadStatus;
use crate::store::{BatchFilter, BatchStore, DownloadFilter};
use crate::types::BatchId;

use super::Database;

#[async_trait]
impl BatchStore for Database {
    async fn batch_status(&self, batch_id: BatchId) -> Result<Option<DownloadStatus>> {
        self.get_batch_status(batch_id).await
    }

    async fn download_statuses(&self, batch_id: BatchId) -> Result<Vec<DownloadStatus>> {
        self.get_download_statuses(batch_id).await
    }

    async fn update_download_statuses(
        &self,
        filter: &DownloadFilter,
        status: DownloadStatus,
    ) -> Result<u64> {
        self.set_download_status_where(filter, status).await
    }

    async fn update_batch_statuses(
        &self,
        filter: &BatchFilter,
        status: DownloadStatus,
        modified_at: DateTime<Utc>,
    ) -> Result<u64> {
        self.set_batch_status_where(filter, status, modified_at).await
    }
}
