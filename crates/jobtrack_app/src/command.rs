//! Line-oriented command parsing for the terminal front end.

use chrono::NaiveDate;

use jobtrack_core::{JobStatus, Msg, SortField, StatusFilter};

pub const HELP: &str = "\
commands:
  refresh                         re-fetch the whole collection
  add <title>; <company>[; <status>][; <YYYY-MM-DD>]
  rm <id>                         delete one job
  set <id> <status>               change one job's status
  note <id> [text]                set or clear one job's notes
  bulk-set <status>               set the status of every selected job
  bulk-rm                         delete every selected job
  search [term]                   filter by title/company substring
  filter <all|status>             filter by status
  sort <id|title|company|status>  sort; repeat to flip direction
  sel <id>                        toggle one job's selection
  sel-vis                         select all visible, or clear if all are
  clear-sel                       clear the selection
  dismiss                         dismiss the current notice
  help, quit
statuses: applied, interview, offer, rejected";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Quit,
    Help,
    Msg(Msg),
}

pub fn parse(line: &str) -> Result<Input, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Input::Msg(Msg::NoOp));
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let msg = match verb {
        "quit" | "exit" => return Ok(Input::Quit),
        "help" => return Ok(Input::Help),
        "refresh" => Msg::RefreshRequested,
        "add" => parse_add(rest)?,
        "rm" => Msg::DeleteRequested(parse_id(rest)?),
        "set" => {
            let (id, status) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| "usage: set <id> <status>".to_string())?;
            Msg::StatusChangeRequested {
                id: parse_id(id)?,
                status: parse_status(status)?,
            }
        }
        "note" => {
            let (id, text) = match rest.split_once(char::is_whitespace) {
                Some((id, text)) => (id, text.trim()),
                None => (rest, ""),
            };
            Msg::NotesChangeRequested {
                id: parse_id(id)?,
                notes: if text.is_empty() {
                    None
                } else {
                    Some(text.to_string())
                },
            }
        }
        "bulk-set" => Msg::BulkStatusRequested(parse_status(rest)?),
        "bulk-rm" => Msg::BulkDeleteRequested,
        "search" => Msg::SearchChanged(rest.to_string()),
        "filter" => Msg::StatusFilterChanged(if rest.eq_ignore_ascii_case("all") {
            StatusFilter::All
        } else {
            StatusFilter::Only(parse_status(rest)?)
        }),
        "sort" => Msg::SortClicked(parse_sort_field(rest)?),
        "sel" => Msg::ToggleSelect(parse_id(rest)?),
        "sel-vis" => Msg::ToggleSelectVisible,
        "clear-sel" => Msg::ClearSelection,
        "dismiss" => Msg::DismissNotice,
        other => return Err(format!("unknown command {other:?}")),
    };
    Ok(Input::Msg(msg))
}

/// `add <title>; <company>[; <status>][; <date>]` - semicolons allow spaces
/// inside titles and company names.
fn parse_add(rest: &str) -> Result<Msg, String> {
    let parts: Vec<&str> = rest.split(';').map(str::trim).collect();
    if parts.len() < 2 || parts.len() > 4 {
        return Err("usage: add <title>; <company>[; <status>][; <YYYY-MM-DD>]".to_string());
    }
    let status = match parts.get(2) {
        Some(raw) if !raw.is_empty() => parse_status(raw)?,
        _ => JobStatus::default(),
    };
    let date_applied = match parts.get(3) {
        Some(raw) if !raw.is_empty() => Some(
            raw.parse::<NaiveDate>()
                .map_err(|err| format!("bad date {raw:?}: {err}"))?,
        ),
        _ => None,
    };
    Ok(Msg::SubmitNewJob {
        title: parts[0].to_string(),
        company: parts[1].to_string(),
        status,
        date_applied,
        notes: None,
    })
}

fn parse_id(raw: &str) -> Result<u64, String> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| format!("bad job id {raw:?}"))
}

fn parse_status(raw: &str) -> Result<JobStatus, String> {
    JobStatus::parse(raw).ok_or_else(|| format!("unknown status {raw:?}"))
}

fn parse_sort_field(raw: &str) -> Result<SortField, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "id" => Ok(SortField::Id),
        "title" => Ok(SortField::Title),
        "company" => Ok(SortField::Company),
        "status" => Ok(SortField::Status),
        other => Err(format!("unknown sort field {other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_with_status_and_date() {
        let input = parse("add Backend Engineer; Initech; interview; 2026-08-01").unwrap();
        assert_eq!(
            input,
            Input::Msg(Msg::SubmitNewJob {
                title: "Backend Engineer".to_string(),
                company: "Initech".to_string(),
                status: JobStatus::Interview,
                date_applied: Some(NaiveDate::from_ymd_opt(2026, 8, 1).unwrap()),
                notes: None,
            })
        );
    }

    #[test]
    fn add_defaults_to_applied() {
        let input = parse("add Dev; Acme").unwrap();
        match input {
            Input::Msg(Msg::SubmitNewJob { status, .. }) => {
                assert_eq!(status, JobStatus::Applied)
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn set_parses_legacy_status_spelling() {
        let input = parse("set 3 Interviewing").unwrap();
        assert_eq!(
            input,
            Input::Msg(Msg::StatusChangeRequested {
                id: 3,
                status: JobStatus::Interview,
            })
        );
    }

    #[test]
    fn empty_search_clears_the_term() {
        assert_eq!(
            parse("search").unwrap(),
            Input::Msg(Msg::SearchChanged(String::new()))
        );
    }

    #[test]
    fn unknown_commands_are_rejected() {
        assert!(parse("frobnicate 1").is_err());
        assert!(parse("set nine offer").is_err());
        assert!(parse("sort salary").is_err());
    }
}
