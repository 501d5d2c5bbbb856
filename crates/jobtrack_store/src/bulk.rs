use futures_util::{stream, StreamExt};

use crate::{JobId, JobRecord, JobStore, StoreError};

/// Per-id results of a batched operation. The batch always settles fully
/// (all-settle join, no short-circuit on the first failure) so callers can
/// commit the successes and retry the failures.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BulkOutcome<T> {
    pub succeeded: Vec<T>,
    pub failed: Vec<(JobId, StoreError)>,
}

impl<T> BulkOutcome<T> {
    pub fn fully_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Updates every record, at most `concurrency` requests in flight.
pub async fn bulk_update(
    store: &dyn JobStore,
    records: Vec<JobRecord>,
    concurrency: usize,
) -> BulkOutcome<JobRecord> {
    let results = stream::iter(records)
        .map(|record| {
            let id = record.id;
            async move { (id, store.update(record).await) }
        })
        .buffer_unordered(concurrency.max(1))
        .collect::<Vec<_>>()
        .await;
    collect_outcome(results, |record: &JobRecord| record.id)
}

/// Deletes every id, at most `concurrency` requests in flight.
pub async fn bulk_delete(
    store: &dyn JobStore,
    ids: Vec<JobId>,
    concurrency: usize,
) -> BulkOutcome<JobId> {
    let results = stream::iter(ids)
        .map(|id| async move { (id, store.delete(id).await.map(|()| id)) })
        .buffer_unordered(concurrency.max(1))
        .collect::<Vec<_>>()
        .await;
    collect_outcome(results, |id: &JobId| *id)
}

/// Settlement order depends on response timing; sort by id so outcomes are
/// deterministic for callers and tests.
fn collect_outcome<T>(
    results: Vec<(JobId, Result<T, StoreError>)>,
    key: impl Fn(&T) -> JobId,
) -> BulkOutcome<T> {
    let mut outcome = BulkOutcome {
        succeeded: Vec::new(),
        failed: Vec::new(),
    };
    for (id, result) in results {
        match result {
            Ok(value) => outcome.succeeded.push(value),
            Err(err) => outcome.failed.push((id, err)),
        }
    }
    outcome.succeeded.sort_by_key(|value| key(value));
    outcome.failed.sort_by_key(|(id, _)| *id);
    outcome
}
