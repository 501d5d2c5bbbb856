use crate::{AppState, Effect, JobId, Msg, Notice};

/// Pure update function: applies a message to state and returns any effects.
///
/// Single mutations are confirmation-driven: nothing touches the collection
/// until the store's response arrives, so a failure needs no rollback.
/// Bulk settlements commit per id and keep failed ids selected for retry.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::RefreshRequested => vec![Effect::LoadJobs],
        Msg::JobsLoaded(jobs) => {
            state.replace_jobs(jobs);
            Vec::new()
        }
        Msg::LoadFailed(reason) => {
            state.set_notice(Notice::Error(format!("could not load jobs: {reason}")));
            Vec::new()
        }
        Msg::SubmitNewJob {
            title,
            company,
            status,
            date_applied,
            notes,
        } => {
            let title = title.trim().to_owned();
            let company = company.trim().to_owned();
            if title.is_empty() || company.is_empty() {
                state.set_notice(Notice::Error(
                    "title and company must not be empty".to_owned(),
                ));
                Vec::new()
            } else {
                vec![Effect::CreateJob {
                    title,
                    company,
                    status,
                    date_applied,
                    notes,
                }]
            }
        }
        Msg::JobCreated(record) => {
            state.set_notice(Notice::Info(format!("added job {}", record.id)));
            state.push_job(record);
            Vec::new()
        }
        Msg::CreateFailed(reason) => {
            state.set_notice(Notice::Error(format!("could not add job: {reason}")));
            Vec::new()
        }
        Msg::DeleteRequested(id) => match state.job(id) {
            Some(_) => vec![Effect::DeleteJob { id }],
            None => Vec::new(),
        },
        Msg::JobDeleted(id) => {
            state.remove_job(id);
            Vec::new()
        }
        Msg::DeleteFailed { id, reason } => {
            state.set_notice(Notice::Error(format!("could not delete job {id}: {reason}")));
            Vec::new()
        }
        Msg::StatusChangeRequested { id, status } => match state.merged_with_status(id, status) {
            Some(record) => vec![Effect::UpdateJob { record }],
            None => Vec::new(),
        },
        Msg::NotesChangeRequested { id, notes } => match state.merged_with_notes(id, notes) {
            Some(record) => vec![Effect::UpdateJob { record }],
            None => Vec::new(),
        },
        Msg::JobUpdated(record) => {
            state.replace_job(record);
            Vec::new()
        }
        Msg::UpdateFailed { id, reason } => {
            state.set_notice(Notice::Error(format!("could not update job {id}: {reason}")));
            Vec::new()
        }
        Msg::BulkStatusRequested(status) => {
            let records: Vec<_> = state
                .view_state()
                .selected
                .iter()
                .filter_map(|&id| state.merged_with_status(id, status))
                .collect();
            if records.is_empty() {
                Vec::new()
            } else {
                vec![Effect::BulkSetStatus { records }]
            }
        }
        Msg::BulkStatusSettled { updated, failed } => {
            for record in updated {
                let id = record.id;
                state.replace_job(record);
                state.deselect(id);
            }
            notice_for_failures(&mut state, "status update", &failed);
            Vec::new()
        }
        Msg::BulkDeleteRequested => {
            let ids: Vec<JobId> = state.view_state().selected.iter().copied().collect();
            if ids.is_empty() {
                Vec::new()
            } else {
                vec![Effect::BulkDelete { ids }]
            }
        }
        Msg::BulkDeleteSettled { deleted, failed } => {
            for id in deleted {
                state.remove_job(id);
            }
            notice_for_failures(&mut state, "delete", &failed);
            Vec::new()
        }
        Msg::SearchChanged(search) => {
            state.set_search(search);
            Vec::new()
        }
        Msg::StatusFilterChanged(filter) => {
            state.set_status_filter(filter);
            Vec::new()
        }
        Msg::SortClicked(field) => {
            state.toggle_sort(field);
            Vec::new()
        }
        Msg::ToggleSelect(id) => {
            state.toggle_select(id);
            Vec::new()
        }
        Msg::ToggleSelectVisible => {
            let visible = state.visible_ids();
            if state.view_state().selected.len() == visible.len() {
                state.set_selection(Default::default());
            } else {
                state.set_selection(visible);
            }
            Vec::new()
        }
        Msg::ClearSelection => {
            state.set_selection(Default::default());
            Vec::new()
        }
        Msg::DismissNotice => {
            state.clear_notice();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Partial bulk failure: the ids stay selected (the retry path is simply
/// re-issuing the bulk op) and are named in the notice.
fn notice_for_failures(state: &mut AppState, what: &str, failed: &[(JobId, String)]) {
    if failed.is_empty() {
        return;
    }
    let ids: Vec<String> = failed.iter().map(|(id, _)| id.to_string()).collect();
    let (_, first_reason) = &failed[0];
    state.set_notice(Notice::Error(format!(
        "bulk {what} failed for job(s) {}: {first_reason}",
        ids.join(", ")
    )));
}
