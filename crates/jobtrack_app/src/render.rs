//! Plain-text rendering of the derived view.

use std::fmt::Write;

use jobtrack_core::{AppViewModel, Notice, SortDirection, SortField, StatusFilter};

const TITLE_WIDTH: usize = 24;
const COMPANY_WIDTH: usize = 18;
const NOTES_WIDTH: usize = 28;

pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();

    if let Some(notice) = &view.notice {
        match notice {
            Notice::Info(text) => writeln!(out, "[info] {text}").ok(),
            Notice::Error(text) => writeln!(out, "[error] {text}").ok(),
        };
    }

    writeln!(
        out,
        "sel {:>4}  {}  {}  {:<9}  {:<10}  {}",
        "id",
        pad("title", TITLE_WIDTH),
        pad("company", COMPANY_WIDTH),
        "status",
        "applied",
        "notes"
    )
    .ok();

    for row in &view.rows {
        let record = &row.record;
        let date = record
            .date_applied
            .map(|d| d.to_string())
            .unwrap_or_default();
        writeln!(
            out,
            "{:>3} {:>4}  {}  {}  {:<9}  {:<10}  {}",
            if row.selected { "*" } else { "" },
            record.id,
            pad(&record.title, TITLE_WIDTH),
            pad(&record.company, COMPANY_WIDTH),
            record.status.to_string(),
            date,
            pad(record.notes.as_deref().unwrap_or(""), NOTES_WIDTH),
        )
        .ok();
    }

    let filter = match view.status_filter {
        StatusFilter::All => "all".to_string(),
        StatusFilter::Only(status) => status.to_string(),
    };
    writeln!(
        out,
        "{} of {} shown | {} selected | sort {} {} | filter {} | search {:?}",
        view.visible,
        view.total,
        view.selected_count,
        sort_label(view.sort_field),
        match view.sort_direction {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        },
        filter,
        view.search,
    )
    .ok();

    out
}

fn sort_label(field: SortField) -> &'static str {
    match field {
        SortField::Id => "id",
        SortField::Title => "title",
        SortField::Company => "company",
        SortField::Status => "status",
    }
}

/// Pads to `width`, truncating with an ellipsis when too long.
fn pad(text: &str, width: usize) -> String {
    let mut s: String = text.chars().take(width).collect();
    if text.chars().count() > width && width > 0 {
        s.truncate(s.len() - s.chars().last().map_or(0, char::len_utf8));
        s.push('~');
    }
    format!("{s:<width$}")
}
