//! Derives a batch status from its downloads.

use std::sync::Arc;

use crate::status::DownloadStatus;
use crate::store::BatchStore;
use crate::types::BatchId;
use crate::{Error, Result};

/// Aggregate a batch's download statuses into one batch status.
///
/// Precedence:
/// 1. any error: the first error status in the slice
/// 2. all success: [`DownloadStatus::Success`]
/// 3. all the same active status: that status
/// 4. anything else: [`DownloadStatus::Running`]
///
/// Returns `None` for an empty slice.
///
/// # Examples
///
/// ```
/// use batch_status::{DownloadStatus::*, aggregate_status};
///
/// assert_eq!(aggregate_status(&[Success, Submitted]), Some(Running));
/// assert_eq!(aggregate_status(&[Success, BatchFailed]), Some(BatchFailed));
/// assert_eq!(aggregate_status(&[Pending, Pending]), Some(Pending));
/// assert_eq!(aggregate_status(&[]), None);
/// ```
pub fn aggregate_status(statuses: &[DownloadStatus]) -> Option<DownloadStatus> {
    let (first, rest) = statuses.split_first()?;

    if let Some(error) = statuses.iter().copied().find(|s| s.is_error()) {
        return Some(error);
    }
    if statuses.iter().all(|s| s.is_success()) {
        return Some(DownloadStatus::Success);
    }
    if rest.iter().all(|s| s == first) {
        return Some(*first);
    }
    Some(DownloadStatus::Running)
}

/// Reads a batch's download statuses and aggregates them. Never writes.
pub struct BatchStatusCalculator<S> {
    store: Arc<S>,
}

impl<S: BatchStore> BatchStatusCalculator<S> {
    /// Create a calculator over a shared store
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Current aggregate status of the batch's downloads
    ///
    /// Issues a single bulk read. Fails with [`Error::EmptyBatch`] when the
    /// batch has no downloads (including when the batch does not exist).
    pub async fn calculate_batch_status(&self, batch_id: BatchId) -> Result<DownloadStatus> {
        let statuses = self.store.download_statuses(batch_id).await?;
        let status = aggregate_status(&statuses).ok_or(Error::EmptyBatch(batch_id))?;

        tracing::debug!(
            batch_id = %batch_id,
            downloads = statuses.len(),
            status = %status,
            "calculated batch status"
        );

        Ok(status)
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::DownloadStatus::*;
    use crate::store::MockBatchStore;

    #[test]
    fn aggregates_reference_cases() {
        let cases: [(&[DownloadStatus], DownloadStatus); 5] = [
            (&[Success, Submitted], Running),
            (&[Success, BatchFailed], BatchFailed),
            (&[Submitted, Submitted, Submitted, Success], Running),
            (&[Success, Success], Success),
            (&[Pending, Pending], Pending),
        ];

        for (statuses, expected) in cases {
            assert_eq!(
                aggregate_status(statuses),
                Some(expected),
                "{statuses:?} should aggregate to {expected:?}"
            );
        }
    }

    #[test]
    fn empty_batch_has_no_aggregate() {
        assert_eq!(aggregate_status(&[]), None);
    }

    #[test]
    fn single_download_is_its_own_aggregate() {
        for status in DownloadStatus::ALL {
            assert_eq!(aggregate_status(&[status]), Some(status));
        }
    }

    #[test]
    fn first_error_wins_when_several_are_present() {
        assert_eq!(
            aggregate_status(&[Running, HttpDataError, Success, Canceled]),
            Some(HttpDataError)
        );
        assert_eq!(
            aggregate_status(&[Canceled, HttpDataError]),
            Some(Canceled)
        );
    }

    #[test]
    fn error_outranks_everything_else() {
        for other in DownloadStatus::ALL {
            for error in DownloadStatus::ALL.into_iter().filter(|s| s.is_error()) {
                let aggregate = aggregate_status(&[other, error]).unwrap();
                assert!(aggregate.is_error(), "[{other:?}, {error:?}] -> {aggregate:?}");
                assert!(
                    aggregate == other || aggregate == error,
                    "aggregate must be one of the inputs"
                );
            }
        }
    }

    #[test]
    fn mixed_non_error_statuses_are_running() {
        let non_errors: Vec<_> = DownloadStatus::ALL
            .into_iter()
            .filter(|s| !s.is_error())
            .collect();

        for &a in &non_errors {
            for &b in &non_errors {
                let expected = if a == b { a } else { Running };
                assert_eq!(aggregate_status(&[a, b]), Some(expected), "[{a:?}, {b:?}]");
            }
        }
    }

    #[test]
    fn identical_active_statuses_keep_their_code() {
        assert_eq!(
            aggregate_status(&[WaitingForNetwork, WaitingForNetwork, WaitingForNetwork]),
            Some(WaitingForNetwork)
        );
        assert_eq!(
            aggregate_status(&[WaitingForNetwork, QueuedForWifi]),
            Some(Running)
        );
    }

    #[tokio::test]
    async fn calculator_reads_statuses_once() {
        let mut store = MockBatchStore::new();
        store
            .expect_download_statuses()
            .with(mockall::predicate::eq(BatchId(1)))
            .times(1)
            .returning(|_| Ok(vec![Success, Submitted]));

        let calculator = BatchStatusCalculator::new(Arc::new(store));
        let status = calculator.calculate_batch_status(BatchId(1)).await.unwrap();

        assert_eq!(status, Running);
    }

    #[tokio::test]
    async fn calculator_rejects_empty_batch() {
        let mut store = MockBatchStore::new();
        store
            .expect_download_statuses()
            .returning(|_| Ok(Vec::new()));

        let calculator = BatchStatusCalculator::new(Arc::new(store));
        let err = calculator
            .calculate_batch_status(BatchId(9))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::EmptyBatch(BatchId(9))), "got {err:?}");
    }
}
