//! Executes core effects against the store client and turns settled store
//! events back into messages.

use std::cell::Cell;

use jobtrack_core::{Effect, Msg};
use jobtrack_store as store;
use jobtrack_store::{StoreEvent, StoreHandle};
use tracker_logging::tracker_info;

pub struct EffectRunner {
    handle: StoreHandle,
    /// Commands sent minus events received; every command settles with
    /// exactly one event.
    in_flight: Cell<usize>,
}

impl EffectRunner {
    pub fn new(handle: StoreHandle) -> Self {
        Self {
            handle,
            in_flight: Cell::new(0),
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.get()
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            self.in_flight.set(self.in_flight.get() + 1);
            match effect {
                Effect::LoadJobs => {
                    tracker_info!("fetching job collection");
                    self.handle.load();
                }
                Effect::CreateJob {
                    title,
                    company,
                    status,
                    date_applied,
                    notes,
                } => self.handle.create(store::NewJob {
                    title,
                    company,
                    status: status_to_wire(status),
                    date_applied,
                    notes,
                }),
                Effect::UpdateJob { record } => self.handle.update(record_to_wire(record)),
                Effect::DeleteJob { id } => self.handle.delete(id),
                Effect::BulkSetStatus { records } => self
                    .handle
                    .bulk_set_status(records.into_iter().map(record_to_wire).collect()),
                Effect::BulkDelete { ids } => self.handle.bulk_delete(ids),
            }
        }
    }

    /// Drains every settled store event into a message, in arrival order.
    pub fn poll(&self) -> Vec<Msg> {
        let mut msgs = Vec::new();
        while let Some(event) = self.handle.try_recv() {
            self.in_flight.set(self.in_flight.get().saturating_sub(1));
            msgs.push(event_to_msg(event));
        }
        msgs
    }
}

fn event_to_msg(event: StoreEvent) -> Msg {
    match event {
        StoreEvent::Loaded(Ok(records)) => {
            Msg::JobsLoaded(records.into_iter().map(record_from_wire).collect())
        }
        StoreEvent::Loaded(Err(err)) => Msg::LoadFailed(err.to_string()),
        StoreEvent::Created(Ok(record)) => Msg::JobCreated(record_from_wire(record)),
        StoreEvent::Created(Err(err)) => Msg::CreateFailed(err.to_string()),
        StoreEvent::Updated { id, result } => match result {
            Ok(record) => Msg::JobUpdated(record_from_wire(record)),
            Err(err) => Msg::UpdateFailed {
                id,
                reason: err.to_string(),
            },
        },
        StoreEvent::Deleted { id, result } => match result {
            Ok(()) => Msg::JobDeleted(id),
            Err(err) => Msg::DeleteFailed {
                id,
                reason: err.to_string(),
            },
        },
        StoreEvent::BulkStatusSettled(outcome) => Msg::BulkStatusSettled {
            updated: outcome.succeeded.into_iter().map(record_from_wire).collect(),
            failed: outcome
                .failed
                .into_iter()
                .map(|(id, err)| (id, err.to_string()))
                .collect(),
        },
        StoreEvent::BulkDeleteSettled(outcome) => Msg::BulkDeleteSettled {
            deleted: outcome.succeeded,
            failed: outcome
                .failed
                .into_iter()
                .map(|(id, err)| (id, err.to_string()))
                .collect(),
        },
    }
}

fn status_to_wire(status: jobtrack_core::JobStatus) -> store::JobStatus {
    match status {
        jobtrack_core::JobStatus::Applied => store::JobStatus::Applied,
        jobtrack_core::JobStatus::Interview => store::JobStatus::Interview,
        jobtrack_core::JobStatus::Offer => store::JobStatus::Offer,
        jobtrack_core::JobStatus::Rejected => store::JobStatus::Rejected,
    }
}

fn status_from_wire(status: store::JobStatus) -> jobtrack_core::JobStatus {
    match status {
        store::JobStatus::Applied => jobtrack_core::JobStatus::Applied,
        store::JobStatus::Interview => jobtrack_core::JobStatus::Interview,
        store::JobStatus::Offer => jobtrack_core::JobStatus::Offer,
        store::JobStatus::Rejected => jobtrack_core::JobStatus::Rejected,
    }
}

fn record_to_wire(record: jobtrack_core::JobRecord) -> store::JobRecord {
    store::JobRecord {
        id: record.id,
        title: record.title,
        company: record.company,
        status: status_to_wire(record.status),
        date_applied: record.date_applied,
        notes: record.notes,
    }
}

fn record_from_wire(record: store::JobRecord) -> jobtrack_core::JobRecord {
    jobtrack_core::JobRecord {
        id: record.id,
        title: record.title,
        company: record.company,
        status: status_from_wire(record.status),
        date_applied: record.date_applied,
        notes: record.notes,
    }
}
