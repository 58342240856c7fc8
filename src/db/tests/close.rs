use super::{open_temp_db, seed_batch};
use crate::status::DownloadStatus;
use crate::store::{BatchFilter, DownloadFilter};
use chrono::Utc;

/// Querying after the pool is closed must report the store as unavailable
/// rather than hang or panic.
#[tokio::test]
async fn test_get_batch_status_after_pool_close_is_unavailable() {
    let (db, _temp_file) = open_temp_db().await;
    let (batch_id, _) = seed_batch(&db, DownloadStatus::Running, &[]).await;

    assert!(db.get_batch_status(batch_id).await.unwrap().is_some());

    db.pool().close().await;

    let result = db.get_batch_status(batch_id).await;
    match result {
        Err(e) => assert!(e.is_store_unavailable(), "unexpected error kind: {e:?}"),
        Ok(v) => panic!("get_batch_status after pool close should fail, got: {v:?}"),
    }
}

#[tokio::test]
async fn test_download_write_after_pool_close_is_unavailable() {
    let (db, _temp_file) = open_temp_db().await;
    let (batch_id, _) = seed_batch(&db, DownloadStatus::Running, &[]).await;

    db.pool().close().await;

    let result = db
        .set_download_status_where(&DownloadFilter::AllInBatch(batch_id), DownloadStatus::Canceled)
        .await;
    assert!(
        result.as_ref().is_err_and(|e| e.is_store_unavailable()),
        "got: {result:?}"
    );
}

#[tokio::test]
async fn test_batch_set_write_after_pool_close_is_unavailable() {
    let (db, _temp_file) = open_temp_db().await;
    let (batch_id, _) = seed_batch(&db, DownloadStatus::Running, &[]).await;

    db.pool().close().await;

    let result = db
        .set_batch_status_where(
            &BatchFilter::IdIn(vec![batch_id]),
            DownloadStatus::Pending,
            Utc::now(),
        )
        .await;
    assert!(
        result.as_ref().is_err_and(|e| e.is_store_unavailable()),
        "got: {result:?}"
    );
}
