use crate::db::Database;
use crate::status::DownloadStatus;
use crate::types::{BatchId, DownloadId, NewBatch, NewDownload};
use tempfile::NamedTempFile;

mod close;
mod downloads;

async fn open_temp_db() -> (Database, NamedTempFile) {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Database::new(temp_file.path()).await.unwrap();
    (db, temp_file)
}

/// Insert a batch holding one download per status, in order
async fn seed_batch(
    db: &Database,
    batch_status: DownloadStatus,
    statuses: &[DownloadStatus],
) -> (BatchId, Vec<DownloadId>) {
    let batch_id = db
        .insert_batch(&NewBatch {
            title: "Season 1".to_string(),
            status: batch_status,
        })
        .await
        .unwrap();

    let mut ids = Vec::with_capacity(statuses.len());
    for (i, status) in statuses.iter().enumerate() {
        let id = db
            .insert_download(&NewDownload {
                batch_id,
                uri: format!("https://example.com/episode-{}.mp4", i),
                status: *status,
            })
            .await
            .unwrap();
        ids.push(id);
    }

    (batch_id, ids)
}
