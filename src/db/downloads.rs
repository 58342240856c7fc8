//! Download row operations.

use sqlx::{QueryBuilder, Sqlite};

use crate::error::DatabaseError;
use crate::status::DownloadStatus;
use crate::store::DownloadFilter;
use crate::types::{BatchId, DownloadId, DownloadItem, NewDownload};
use crate::{Error, Result};

use super::Database;

impl Database {
    /// Insert a new download record
    pub async fn insert_download(&self, download: &NewDownload) -> Result<DownloadId> {
        let now = chrono::Utc::now().timestamp_millis();

        let result = sqlx::query(
            r#"
            INSERT INTO downloads (batch_id, uri, status, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(download.batch_id)
        .bind(&download.uri)
        .bind(download.status)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Database(DatabaseError::from_sqlx("Failed to insert download", e)))?;

        Ok(DownloadId(result.last_insert_rowid()))
    }

    /// Get a download by ID
    pub async fn get_download(&self, id: DownloadId) -> Result<Option<DownloadItem>> {
        let row = sqlx::query_as::<_, DownloadItem>(
            r#"
            SELECT id, batch_id, uri, status, created_at
            FROM downloads
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Error::Database(DatabaseError::from_sqlx("Failed to get download", e)))?;

        Ok(row)
    }

    /// List all downloads belonging to a batch
    pub async fn list_downloads_for_batch(&self, batch_id: BatchId) -> Result<Vec<DownloadItem>> {
        let rows = sqlx::query_as::<_, DownloadItem>(
            r#"
            SELECT id, batch_id, uri, status, created_at
            FROM downloads
            WHERE batch_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(batch_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            Error::Database(DatabaseError::from_sqlx("Failed to list downloads for batch", e))
        })?;

        Ok(rows)
    }

    /// Get the status of every download in a batch, lowest id first
    pub async fn get_download_statuses(&self, batch_id: BatchId) -> Result<Vec<DownloadStatus>> {
        let statuses = sqlx::query_scalar::<_, DownloadStatus>(
            "SELECT status FROM downloads WHERE batch_id = ? ORDER BY id ASC",
        )
        .bind(batch_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            Error::Database(DatabaseError::from_sqlx("Failed to get download statuses", e))
        })?;

        Ok(statuses)
    }

    /// Set status on every download matched by `filter`
    pub async fn set_download_status_where(
        &self,
        filter: &DownloadFilter,
        status: DownloadStatus,
    ) -> Result<u64> {
        let mut query_builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("UPDATE downloads SET status = ");
        query_builder.push_bind(status);
        query_builder.push(" WHERE batch_id = ");
        query_builder.push_bind(filter.batch_id());
        if let DownloadFilter::AllInBatchExcept { except, .. } = filter {
            query_builder.push(" AND id <> ");
            query_builder.push_bind(*except);
        }

        let result = query_builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| {
                Error::Database(DatabaseError::from_sqlx(
                    "Failed to update download statuses",
                    e,
                ))
            })?;

        Ok(result.rows_affected())
    }
}
