use chrono::NaiveDate;

use crate::{JobId, JobRecord, JobStatus, SortField, StatusFilter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User asked for a fresh fetch of the whole collection.
    RefreshRequested,
    /// Store delivered the full collection.
    JobsLoaded(Vec<JobRecord>),
    /// Full fetch failed; prior local state is kept untouched.
    LoadFailed(String),
    /// User submitted the add-job form.
    SubmitNewJob {
        title: String,
        company: String,
        status: JobStatus,
        date_applied: Option<NaiveDate>,
        notes: Option<String>,
    },
    /// Store confirmed a create and assigned the id.
    JobCreated(JobRecord),
    CreateFailed(String),
    /// User asked to delete a single record.
    DeleteRequested(JobId),
    /// Store confirmed a delete.
    JobDeleted(JobId),
    DeleteFailed { id: JobId, reason: String },
    /// User changed one record's status.
    StatusChangeRequested { id: JobId, status: JobStatus },
    /// User edited one record's notes (`None` clears them).
    NotesChangeRequested { id: JobId, notes: Option<String> },
    /// Store returned the record resulting from an update; it becomes the
    /// new local truth for that id.
    JobUpdated(JobRecord),
    UpdateFailed { id: JobId, reason: String },
    /// User asked to set every selected record to one status.
    BulkStatusRequested(JobStatus),
    /// Batched status update settled, with per-id outcomes.
    BulkStatusSettled {
        updated: Vec<JobRecord>,
        failed: Vec<(JobId, String)>,
    },
    /// User asked to delete every selected record.
    BulkDeleteRequested,
    /// Batched delete settled, with per-id outcomes.
    BulkDeleteSettled {
        deleted: Vec<JobId>,
        failed: Vec<(JobId, String)>,
    },
    /// Search box text changed (case-insensitive substring match).
    SearchChanged(String),
    StatusFilterChanged(StatusFilter),
    /// Column header click: same field flips direction, new field sorts
    /// ascending.
    SortClicked(SortField),
    ToggleSelect(JobId),
    /// Select every record passing the current filter, or clear when the
    /// visible set is already fully selected.
    ToggleSelectVisible,
    ClearSelection,
    DismissNotice,
    /// Fallback for placeholder wiring.
    NoOp,
}
