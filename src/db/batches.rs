//! Batch row operations.

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite};

use crate::error::DatabaseError;
use crate::status::DownloadStatus;
use crate::store::BatchFilter;
use crate::types::{Batch, BatchId, NewBatch};
use crate::{Error, Result};

use super::{Database, MAX_IDS_PER_STATEMENT};

impl Database {
    /// Insert a new batch record
    pub async fn insert_batch(&self, batch: &NewBatch) -> Result<BatchId> {
        let now = Utc::now().timestamp_millis();

        let result = sqlx::query(
            r#"
            INSERT INTO batches (title, status, last_modified, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&batch.title)
        .bind(batch.status)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Database(DatabaseError::from_sqlx("Failed to insert batch", e)))?;

        Ok(BatchId(result.last_insert_rowid()))
    }

    /// Get a batch by ID
    pub async fn get_batch(&self, id: BatchId) -> Result<Option<Batch>> {
        let row = sqlx::query_as::<_, Batch>(
            r#"
            SELECT id, title, status, last_modified, created_at
            FROM batches
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Error::Database(DatabaseError::from_sqlx("Failed to get batch", e)))?;

        Ok(row)
    }

    /// Get only the cached status of a batch
    pub async fn get_batch_status(&self, id: BatchId) -> Result<Option<DownloadStatus>> {
        let status = sqlx::query_scalar::<_, DownloadStatus>("SELECT status FROM batches WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                Error::Database(DatabaseError::from_sqlx("Failed to get batch status", e))
            })?;

        Ok(status)
    }

    /// Set status and last-modified time on every batch matched by `filter`
    ///
    /// Large id sets are split across several statements inside one
    /// transaction, so the write still lands all at once.
    pub async fn set_batch_status_where(
        &self,
        filter: &BatchFilter,
        status: DownloadStatus,
        modified_at: DateTime<Utc>,
    ) -> Result<u64> {
        let modified_ms = modified_at.timestamp_millis();

        let ids = match filter {
            BatchFilter::Id(id) => {
                let result =
                    sqlx::query("UPDATE batches SET status = ?, last_modified = ? WHERE id = ?")
                        .bind(status)
                        .bind(modified_ms)
                        .bind(*id)
                        .execute(&self.pool)
                        .await
                        .map_err(|e| {
                            Error::Database(DatabaseError::from_sqlx(
                                "Failed to update batch status",
                                e,
                            ))
                        })?;
                return Ok(result.rows_affected());
            }
            BatchFilter::IdIn(ids) => ids,
        };

        if ids.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await.map_err(|e| {
            Error::Database(DatabaseError::from_sqlx("Failed to begin transaction", e))
        })?;

        let mut rows = 0;
        for chunk in ids.chunks(MAX_IDS_PER_STATEMENT) {
            let mut query_builder: QueryBuilder<Sqlite> =
                QueryBuilder::new("UPDATE batches SET status = ");
            query_builder.push_bind(status);
            query_builder.push(", last_modified = ");
            query_builder.push_bind(modified_ms);
            query_builder.push(" WHERE id IN (");

            let mut separated = query_builder.separated(", ");
            for id in chunk {
                separated.push_bind(*id);
            }
            separated.push_unseparated(")");

            let result = query_builder
                .build()
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    Error::Database(DatabaseError::from_sqlx(
                        "Failed to update batch statuses",
                        e,
                    ))
                })?;
            rows += result.rows_affected();
        }

        tx.commit().await.map_err(|e| {
            Error::Database(DatabaseError::from_sqlx(
                "Failed to commit batch status update",
                e,
            ))
        })?;

        Ok(rows)
    }
}
