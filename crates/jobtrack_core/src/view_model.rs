use std::cmp::Ordering;

use crate::{JobRecord, Notice, SortDirection, SortField, StatusFilter, ViewState};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub rows: Vec<JobRowView>,
    /// Collection size before filtering.
    pub total: usize,
    pub visible: usize,
    pub selected_count: usize,
    pub search: String,
    pub status_filter: StatusFilter,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRowView {
    pub record: JobRecord,
    pub selected: bool,
}

/// Pure derivation: filter, sort, annotate. Never mutates the inputs.
pub(crate) fn derive_rows(jobs: &[JobRecord], view: &ViewState) -> Vec<JobRowView> {
    let mut rows: Vec<JobRowView> = jobs
        .iter()
        .filter(|job| matches_filter(job, view))
        .map(|job| JobRowView {
            record: job.clone(),
            selected: view.selected.contains(&job.id),
        })
        .collect();

    rows.sort_by(|a, b| {
        let ordering = compare_records(&a.record, &b.record, view.sort_field);
        match view.sort_direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });

    rows
}

pub(crate) fn matches_filter(job: &JobRecord, view: &ViewState) -> bool {
    let search_ok = if view.search.is_empty() {
        true
    } else {
        let needle = view.search.to_lowercase();
        job.title.to_lowercase().contains(&needle)
            || job.company.to_lowercase().contains(&needle)
    };
    let status_ok = match view.status_filter {
        StatusFilter::All => true,
        StatusFilter::Only(status) => job.status == status,
    };
    search_ok && status_ok
}

/// Total order: field key first (strings case-insensitive), id as tie-break
/// so equal keys still sort deterministically.
fn compare_records(a: &JobRecord, b: &JobRecord, field: SortField) -> Ordering {
    let by_field = match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Title => caseless_cmp(&a.title, &b.title),
        SortField::Company => caseless_cmp(&a.company, &b.company),
        SortField::Status => a.status.cmp(&b.status),
    };
    by_field.then_with(|| a.id.cmp(&b.id))
}

fn caseless_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}
