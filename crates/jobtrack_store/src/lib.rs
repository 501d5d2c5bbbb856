//! Job store client: REST transport, bulk fan-out, and sync bridge.
mod bulk;
mod handle;
mod rest;
mod types;

pub use bulk::{bulk_delete, bulk_update, BulkOutcome};
pub use handle::{StoreEvent, StoreHandle};
pub use rest::{JobStore, RestJobStore, StoreSettings};
pub use types::{JobId, JobRecord, JobStatus, NewJob, StoreError};
