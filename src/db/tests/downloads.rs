use super::{open_temp_db, seed_batch};
use crate::status::DownloadStatus::{self, *};
use crate::store::DownloadFilter;
use crate::types::{DownloadId, NewDownload};

#[tokio::test]
async fn test_insert_and_get_download() {
    let (db, _temp_file) = open_temp_db().await;
    let (batch_id, _) = seed_batch(&db, Pending, &[]).await;

    let id = db
        .insert_download(&NewDownload {
            batch_id,
            uri: "https://example.com/file.bin".to_string(),
            status: Submitted,
        })
        .await
        .unwrap();

    let download = db.get_download(id).await.unwrap().unwrap();
    assert_eq!(download.batch_id, batch_id);
    assert_eq!(download.uri, "https://example.com/file.bin");
    assert_eq!(download.status, Submitted);

    assert!(db.get_download(DownloadId(12345)).await.unwrap().is_none());

    db.close().await;
}

#[tokio::test]
async fn test_download_requires_existing_batch() {
    let (db, _temp_file) = open_temp_db().await;

    let result = db
        .insert_download(&NewDownload {
            batch_id: crate::types::BatchId(404),
            uri: "https://example.com/orphan".to_string(),
            status: Pending,
        })
        .await;
    assert!(result.is_err(), "foreign key must reject orphan downloads");

    db.close().await;
}

#[tokio::test]
async fn test_download_statuses_are_scoped_and_ordered() {
    let (db, _temp_file) = open_temp_db().await;
    let (batch_id, _) = seed_batch(&db, Running, &[Success, Running, HttpDataError]).await;
    let (_other, _) = seed_batch(&db, Pending, &[Pending]).await;

    let statuses = db.get_download_statuses(batch_id).await.unwrap();
    assert_eq!(statuses, vec![Success, Running, HttpDataError]);

    let listed = db.list_downloads_for_batch(batch_id).await.unwrap();
    assert_eq!(listed.len(), 3);
    assert!(listed.windows(2).all(|w| w[0].id < w[1].id));

    db.close().await;
}

#[tokio::test]
async fn test_unrecognized_stored_code_reads_as_unknown_error() {
    let (db, _temp_file) = open_temp_db().await;
    let (batch_id, ids) = seed_batch(&db, Running, &[Running]).await;

    sqlx::query("UPDATE downloads SET status = 12 WHERE id = ?")
        .bind(ids[0])
        .execute(db.pool())
        .await
        .unwrap();

    let statuses = db.get_download_statuses(batch_id).await.unwrap();
    assert_eq!(statuses, vec![UnknownError]);

    db.close().await;
}

#[tokio::test]
async fn test_set_status_for_whole_batch() {
    let (db, _temp_file) = open_temp_db().await;
    let (batch_id, _) = seed_batch(&db, Running, &[Running, Success, Pending]).await;
    let (other_id, _) = seed_batch(&db, Running, &[Running]).await;

    let rows = db
        .set_download_status_where(&DownloadFilter::AllInBatch(batch_id), Canceled)
        .await
        .unwrap();
    assert_eq!(rows, 3);

    let statuses = db.get_download_statuses(batch_id).await.unwrap();
    assert!(statuses.iter().all(|s| *s == Canceled));
    assert_eq!(db.get_download_statuses(other_id).await.unwrap(), vec![Running]);

    db.close().await;
}

#[tokio::test]
async fn test_set_status_except_one_download() {
    let (db, _temp_file) = open_temp_db().await;
    let (batch_id, ids) = seed_batch(&db, Running, &[Running, HttpException, Pending]).await;

    let rows = db
        .set_download_status_where(
            &DownloadFilter::AllInBatchExcept {
                batch_id,
                except: ids[1],
            },
            BatchFailed,
        )
        .await
        .unwrap();
    assert_eq!(rows, 2);

    let statuses: Vec<DownloadStatus> = db.get_download_statuses(batch_id).await.unwrap();
    assert_eq!(statuses, vec![BatchFailed, HttpException, BatchFailed]);

    db.close().await;
}

#[tokio::test]
async fn test_set_status_for_empty_batch_is_no_op() {
    let (db, _temp_file) = open_temp_db().await;
    let (batch_id, _) = seed_batch(&db, Pending, &[]).await;

    let rows = db
        .set_download_status_where(&DownloadFilter::AllInBatch(batch_id), Canceled)
        .await
        .unwrap();
    assert_eq!(rows, 0);

    db.close().await;
}
