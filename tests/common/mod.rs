//! Common test utilities for batch-status integration tests

use batch_status::{
    BatchId, BatchStatusRepository, Database, DownloadId, DownloadStatus, FixedClock, NewBatch,
    NewDownload,
};
use tempfile::TempDir;

/// Instant every repository write is stamped with
pub const NOW_MILLIS: i64 = 1_720_000_000_000;

/// Repository over a fresh on-disk database with a frozen clock
///
/// Keep the returned TempDir alive for the duration of the test.
pub async fn test_repository() -> (BatchStatusRepository<Database, FixedClock>, TempDir) {
    let temp_dir = tempfile::tempdir().unwrap();
    let db = Database::new(&temp_dir.path().join("batches.db"))
        .await
        .unwrap();
    let repository = BatchStatusRepository::new(db, FixedClock::at_millis(NOW_MILLIS));
    (repository, temp_dir)
}

/// Insert a batch with one download per status
pub async fn seed_batch(
    db: &Database,
    batch_status: DownloadStatus,
    statuses: &[DownloadStatus],
) -> (BatchId, Vec<DownloadId>) {
    let batch_id = db
        .insert_batch(&NewBatch {
            title: "fixture batch".to_string(),
            status: batch_status,
        })
        .await
        .unwrap();

    let mut ids = Vec::new();
    for (i, status) in statuses.iter().enumerate() {
        ids.push(
            db.insert_download(&NewDownload {
                batch_id,
                uri: format!("https://cdn.example.com/asset-{}", i),
                status: *status,
            })
            .await
            .unwrap(),
        );
    }
    (batch_id, ids)
}

/// Statuses of a batch's downloads, lowest id first
pub async fn download_statuses(db: &Database, batch_id: BatchId) -> Vec<DownloadStatus> {
    db.list_downloads_for_batch(batch_id)
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.status)
        .collect()
}
