use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type JobId = u64;

/// Application status as the store serializes it. Canonical wire strings are
/// lowercase; aliases cover the capitalized and "interviewing" spellings
/// older data used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    #[serde(alias = "Applied")]
    Applied,
    #[serde(alias = "Interview", alias = "interviewing", alias = "Interviewing")]
    Interview,
    #[serde(alias = "Offer")]
    Offer,
    #[serde(alias = "Rejected")]
    Rejected,
}

/// Wire shape of one job record: `{id, title, company, status}` plus the
/// optional `date_applied` and `notes` columns the store carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: JobId,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_applied: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body for `POST /jobs`. Carries no id: the store is the sole id authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewJob {
    pub title: String,
    pub company: String,
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_applied: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("http status {0}")]
    HttpStatus(u16),
}
