use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;

use crate::view_model::{derive_rows, AppViewModel};

pub type JobId = u64;

/// Canonical application status. Wire strings are lowercase; parsing also
/// accepts the capitalized and "interviewing" spellings seen in older data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum JobStatus {
    #[default]
    Applied,
    Interview,
    Offer,
    Rejected,
}

impl JobStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Applied => "applied",
            JobStatus::Interview => "interview",
            JobStatus::Offer => "offer",
            JobStatus::Rejected => "rejected",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "applied" => Some(JobStatus::Applied),
            "interview" | "interviewing" => Some(JobStatus::Interview),
            "offer" => Some(JobStatus::Offer),
            "rejected" => Some(JobStatus::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One tracked application. The id is assigned by the remote store and is
/// stable across updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub status: JobStatus,
    pub date_applied: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(JobStatus),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Id,
    Title,
    Company,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// User-controlled view parameters. `selected` is always a subset of the
/// ids currently in the collection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    pub search: String,
    pub status_filter: StatusFilter,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
    pub selected: BTreeSet<JobId>,
}

/// Transient user-visible message, typically a failed store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    jobs: Vec<JobRecord>,
    view: ViewState,
    notice: Option<Notice>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives the filtered, sorted, selection-annotated view model.
    pub fn view(&self) -> AppViewModel {
        let rows = derive_rows(&self.jobs, &self.view);
        AppViewModel {
            visible: rows.len(),
            rows,
            total: self.jobs.len(),
            selected_count: self.view.selected.len(),
            search: self.view.search.clone(),
            status_filter: self.view.status_filter,
            sort_field: self.view.sort_field,
            sort_direction: self.view.sort_direction,
            notice: self.notice.clone(),
        }
    }

    /// Returns whether a repaint is needed and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn jobs(&self) -> &[JobRecord] {
        &self.jobs
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn job(&self, id: JobId) -> Option<&JobRecord> {
        self.jobs.iter().find(|job| job.id == id)
    }

    /// Full replacement from a fresh fetch. Store order is kept verbatim;
    /// selection entries for ids that no longer exist are pruned.
    pub(crate) fn replace_jobs(&mut self, jobs: Vec<JobRecord>) {
        self.jobs = jobs;
        let live: BTreeSet<JobId> = self.jobs.iter().map(|job| job.id).collect();
        self.view.selected.retain(|id| live.contains(id));
        self.mark_dirty();
    }

    /// Arrival-order append; sorting is a view concern only.
    pub(crate) fn push_job(&mut self, job: JobRecord) {
        self.jobs.push(job);
        self.mark_dirty();
    }

    pub(crate) fn remove_job(&mut self, id: JobId) {
        self.jobs.retain(|job| job.id != id);
        self.view.selected.remove(&id);
        self.mark_dirty();
    }

    /// Replaces the entry for `record.id` with the store's returned record.
    /// Unknown ids are ignored (the record was deleted while the update was
    /// in flight).
    pub(crate) fn replace_job(&mut self, record: JobRecord) {
        if let Some(slot) = self.jobs.iter_mut().find(|job| job.id == record.id) {
            *slot = record;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_search(&mut self, search: String) {
        if self.view.search != search {
            self.view.search = search;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_status_filter(&mut self, filter: StatusFilter) {
        if self.view.status_filter != filter {
            self.view.status_filter = filter;
            self.mark_dirty();
        }
    }

    /// Clicking the current sort field flips direction; a new field sorts
    /// ascending.
    pub(crate) fn toggle_sort(&mut self, field: SortField) {
        if self.view.sort_field == field {
            self.view.sort_direction = match self.view.sort_direction {
                SortDirection::Ascending => SortDirection::Descending,
                SortDirection::Descending => SortDirection::Ascending,
            };
        } else {
            self.view.sort_field = field;
            self.view.sort_direction = SortDirection::Ascending;
        }
        self.mark_dirty();
    }

    pub(crate) fn toggle_select(&mut self, id: JobId) {
        if self.job(id).is_none() {
            return;
        }
        if !self.view.selected.remove(&id) {
            self.view.selected.insert(id);
        }
        self.mark_dirty();
    }

    pub(crate) fn set_selection(&mut self, ids: BTreeSet<JobId>) {
        if self.view.selected != ids {
            self.view.selected = ids;
            self.mark_dirty();
        }
    }

    pub(crate) fn deselect(&mut self, id: JobId) {
        if self.view.selected.remove(&id) {
            self.mark_dirty();
        }
    }

    pub(crate) fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.mark_dirty();
    }

    pub(crate) fn clear_notice(&mut self) {
        if self.notice.take().is_some() {
            self.mark_dirty();
        }
    }

    /// Ids surviving the filter step, in collection order. Used by
    /// select-all-visible; sort order is irrelevant for a set.
    pub(crate) fn visible_ids(&self) -> BTreeSet<JobId> {
        self.jobs
            .iter()
            .filter(|job| crate::view_model::matches_filter(job, &self.view))
            .map(|job| job.id)
            .collect()
    }

    /// Clones the record for `id` with a new status, for a full-record PUT.
    pub(crate) fn merged_with_status(&self, id: JobId, status: JobStatus) -> Option<JobRecord> {
        self.job(id).map(|job| JobRecord {
            status,
            ..job.clone()
        })
    }

    /// Clones the record for `id` with new notes, for a full-record PUT.
    pub(crate) fn merged_with_notes(&self, id: JobId, notes: Option<String>) -> Option<JobRecord> {
        self.job(id).map(|job| JobRecord {
            notes,
            ..job.clone()
        })
    }
}
