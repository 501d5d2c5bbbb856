use std::sync::{mpsc, Arc};
use std::thread;

use tracker_logging::{tracker_debug, tracker_warn};

use crate::{
    bulk_delete, bulk_update, JobId, JobRecord, NewJob, RestJobStore, StoreError, StoreSettings,
};
use crate::{BulkOutcome, JobStore};

enum StoreCommand {
    Load,
    Create(NewJob),
    Update(JobRecord),
    Delete(JobId),
    BulkSetStatus(Vec<JobRecord>),
    BulkDelete(Vec<JobId>),
}

/// Outcome of one remote call (or one batched fan-out), delivered on the
/// event channel in settlement order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Loaded(Result<Vec<JobRecord>, StoreError>),
    Created(Result<JobRecord, StoreError>),
    Updated {
        id: JobId,
        result: Result<JobRecord, StoreError>,
    },
    Deleted {
        id: JobId,
        result: Result<(), StoreError>,
    },
    BulkStatusSettled(BulkOutcome<JobRecord>),
    BulkDeleteSettled(BulkOutcome<JobId>),
}

/// Bridge between the synchronous UI thread and the async REST client: a
/// dedicated thread owns a tokio runtime and spawns one task per command.
/// Overlapping commands run concurrently; the last response to settle wins
/// in local state.
pub struct StoreHandle {
    cmd_tx: mpsc::Sender<StoreCommand>,
    event_rx: mpsc::Receiver<StoreEvent>,
}

impl StoreHandle {
    pub fn new(settings: StoreSettings) -> Result<Self, StoreError> {
        let concurrency = settings.bulk_concurrency;
        let store = Arc::new(RestJobStore::new(settings)?);
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let store = store.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(store.as_ref(), concurrency, command, event_tx).await;
                });
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn load(&self) {
        self.send(StoreCommand::Load);
    }

    pub fn create(&self, job: NewJob) {
        self.send(StoreCommand::Create(job));
    }

    pub fn update(&self, record: JobRecord) {
        self.send(StoreCommand::Update(record));
    }

    pub fn delete(&self, id: JobId) {
        self.send(StoreCommand::Delete(id));
    }

    pub fn bulk_set_status(&self, records: Vec<JobRecord>) {
        self.send(StoreCommand::BulkSetStatus(records));
    }

    pub fn bulk_delete(&self, ids: Vec<JobId>) {
        self.send(StoreCommand::BulkDelete(ids));
    }

    pub fn try_recv(&self) -> Option<StoreEvent> {
        self.event_rx.try_recv().ok()
    }

    fn send(&self, command: StoreCommand) {
        let _ = self.cmd_tx.send(command);
    }
}

async fn handle_command(
    store: &RestJobStore,
    concurrency: usize,
    command: StoreCommand,
    event_tx: mpsc::Sender<StoreEvent>,
) {
    let event = match command {
        StoreCommand::Load => {
            let result = store.list().await;
            if let Err(err) = &result {
                tracker_warn!("list failed: {err}");
            }
            StoreEvent::Loaded(result)
        }
        StoreCommand::Create(job) => {
            let result = store.create(job).await;
            if let Err(err) = &result {
                tracker_warn!("create failed: {err}");
            }
            StoreEvent::Created(result)
        }
        StoreCommand::Update(record) => {
            let id = record.id;
            let result = store.update(record).await;
            if let Err(err) = &result {
                tracker_warn!("update of job {id} failed: {err}");
            }
            StoreEvent::Updated { id, result }
        }
        StoreCommand::Delete(id) => {
            let result = store.delete(id).await;
            if let Err(err) = &result {
                tracker_warn!("delete of job {id} failed: {err}");
            }
            StoreEvent::Deleted { id, result }
        }
        StoreCommand::BulkSetStatus(records) => {
            tracker_debug!("bulk status update for {} job(s)", records.len());
            let outcome = bulk_update(store, records, concurrency).await;
            for (id, err) in &outcome.failed {
                tracker_warn!("bulk update of job {id} failed: {err}");
            }
            StoreEvent::BulkStatusSettled(outcome)
        }
        StoreCommand::BulkDelete(ids) => {
            tracker_debug!("bulk delete for {} job(s)", ids.len());
            let outcome = bulk_delete(store, ids, concurrency).await;
            for (id, err) in &outcome.failed {
                tracker_warn!("bulk delete of job {id} failed: {err}");
            }
            StoreEvent::BulkDeleteSettled(outcome)
        }
    };
    let _ = event_tx.send(event);
}
