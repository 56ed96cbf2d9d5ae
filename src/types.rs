//! Shared types used across modules
//!
//! The record model is serialized with the camelCase/kebab-case wire names
//! used by the durable slots and backup files, so old data keeps loading.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Learning status of a technology record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    NotStarted,
    InProgress,
    Completed,
}

impl Status {
    /// Next status in the fixed cycle:
    /// not-started → in-progress → completed → not-started
    pub fn next(self) -> Status {
        match self {
            Status::NotStarted => Status::InProgress,
            Status::InProgress => Status::Completed,
            Status::Completed => Status::NotStarted,
        }
    }

    /// Parse from the wire string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "not-started" => Some(Status::NotStarted),
            "in-progress" => Some(Status::InProgress),
            "completed" => Some(Status::Completed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::NotStarted => "not-started",
            Status::InProgress => "in-progress",
            Status::Completed => "completed",
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::NotStarted
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Unrecognized statuses from old or hand-edited data are coerced to
// not-started at the boundary, so the store only ever holds the three
// enumerated values.
impl<'de> Deserialize<'de> for Status {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Status::parse(&s).unwrap_or(Status::NotStarted))
    }
}

/// Technology category
///
/// The fixed set is what the tracker knows how to group and label; anything
/// else is preserved verbatim and displayed generically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Frontend,
    Backend,
    Database,
    Devops,
    Mobile,
    Other,
    #[serde(untagged)]
    Custom(String),
}

impl Category {
    /// Parse from the wire string, keeping unknown values
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "frontend" => Category::Frontend,
            "backend" => Category::Backend,
            "database" => Category::Database,
            "devops" => Category::Devops,
            "mobile" => Category::Mobile,
            "other" => Category::Other,
            _ => Category::Custom(s.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::Frontend => "frontend",
            Category::Backend => "backend",
            Category::Database => "database",
            Category::Devops => "devops",
            Category::Mobile => "mobile",
            Category::Other => "other",
            Category::Custom(s) => s,
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Other
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Provenance of a record, informational only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Source {
    Local,
    Api,
    Imported,
    ExternalApi,
}

impl Default for Source {
    fn default() -> Self {
        Source::Local
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Local => write!(f, "local"),
            Source::Api => write!(f, "api"),
            Source::Imported => write!(f, "imported"),
            Source::ExternalApi => write!(f, "external-api"),
        }
    }
}

/// A tracked technology
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnologyRecord {
    /// Unique across the full list, never reused after deletion
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub source: Source,
    /// Set for records created locally or pulled from the demo API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Set for records brought in by a roadmap or file import
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imported_at: Option<DateTime<Utc>>,
}

/// Input for creating a record
#[derive(Debug, Clone, Default)]
pub struct NewTechnology {
    pub title: String,
    pub description: String,
    pub notes: String,
    pub category: Category,
    pub status: Status,
}

/// Status filter for list/filter operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    /// Sentinel: match every status
    All,
    Only(Status),
}

impl StatusFilter {
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("all") {
            Some(StatusFilter::All)
        } else {
            Status::parse(s).map(StatusFilter::Only)
        }
    }

    pub fn matches(&self, status: Status) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(s) => *s == status,
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusFilter::All => write!(f, "all"),
            StatusFilter::Only(s) => write!(f, "{}", s),
        }
    }
}
