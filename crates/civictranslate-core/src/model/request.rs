// ── Translation request domain types ──

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ── RequestId ───────────────────────────────────────────────────────

/// Identifier of a translation request, `TRQ-NNN`.
///
/// Ids assigned locally are always produced by [`RequestId::from_sequence`];
/// ids coming back from a server are accepted verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    pub const PREFIX: &'static str = "TRQ-";

    /// `7` → `TRQ-007`, `1234` → `TRQ-1234`.
    pub fn from_sequence(n: u32) -> Self {
        Self(format!("{}{n:03}", Self::PREFIX))
    }

    /// The numeric suffix, if this id follows the `TRQ-NNN` format.
    pub fn sequence(&self) -> Option<u32> {
        self.0.strip_prefix(Self::PREFIX)?.parse().ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RequestId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_owned()))
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for RequestId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for RequestId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RequestId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// ── Enums ───────────────────────────────────────────────────────────

/// Workflow state of a request.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum RequestStatus {
    Pending,
    InProgress,
    Completed,
}

/// How urgently a request should be handled.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

// ── TranslationRequest ──────────────────────────────────────────────

/// One translation request tracked by the dashboard.
///
/// `id` never changes once assigned. `updated_at` is rewritten on every
/// mutation and never moves backwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRequest {
    pub id: RequestId,
    pub title: String,
    pub source_language: String,
    pub target_language: String,
    pub status: RequestStatus,
    pub priority: Priority,
    pub description: String,
    pub created_by: String,
    pub created_at: NaiveDate,
    pub updated_at: NaiveDate,
}

impl TranslationRequest {
    /// Apply a status change stamped with `today`.
    pub(crate) fn set_status(&mut self, status: RequestStatus, today: NaiveDate) {
        self.status = status;
        self.updated_at = self.updated_at.max(today);
    }

    /// Case-insensitive match over id, title, description, and languages.
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        [
            self.id.as_str(),
            self.title.as_str(),
            self.description.as_str(),
            self.source_language.as_str(),
            self.target_language.as_str(),
            self.created_by.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// User-supplied fields for a new request. The backend fills in the id,
/// status, and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRequest {
    pub title: String,
    pub source_language: String,
    pub target_language: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_by: String,
}

impl NewRequest {
    /// Materialize a record with the given id, `pending` status, and both
    /// timestamps set to `today`.
    pub(crate) fn into_record(self, id: RequestId, today: NaiveDate) -> TranslationRequest {
        TranslationRequest {
            id,
            title: self.title,
            source_language: self.source_language,
            target_language: self.target_language,
            status: RequestStatus::Pending,
            priority: self.priority,
            description: self.description,
            created_by: self.created_by,
            created_at: today,
            updated_at: today,
        }
    }
}
