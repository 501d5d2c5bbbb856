use chrono::NaiveDate;

use crate::{JobId, JobRecord, JobStatus};

/// IO the update function asks the platform layer to perform. Each variant
/// maps onto one remote-store call (or one batched fan-out).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadJobs,
    CreateJob {
        title: String,
        company: String,
        status: JobStatus,
        date_applied: Option<NaiveDate>,
        notes: Option<String>,
    },
    /// Full merged record for a PUT; the store replies with its own copy.
    UpdateJob { record: JobRecord },
    DeleteJob { id: JobId },
    BulkSetStatus { records: Vec<JobRecord> },
    BulkDelete { ids: Vec<JobId> },
}
