//! Error taxonomy for the tracker data layer
//!
//! The CLI layer composes these with `anyhow`; inside the library every
//! fallible path returns `Result<T>` from this module.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    /// A required field is missing or invalid. Blocks the write.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Read-path lookup for an id that does not exist. Mutating operations
    /// referencing a missing id no-op instead of returning this.
    #[error("no technology with id {0}")]
    NotFound(i64),

    /// Persisted data that cannot be parsed. The record slot degrades to
    /// empty on load; backup files surface this on import.
    #[error("stored data is corrupt: {0}")]
    StorageCorrupt(String),

    /// Demo API failure. Surfaced with a retry hint, never blocks core CRUD.
    #[error("network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TrackerError>;
