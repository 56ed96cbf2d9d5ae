//! Tech Tracker - Technology Learning Progress Library
//!
//! A local-first tracker with:
//! - A durable record store for technologies (title, category, status, notes)
//! - Pure statistics aggregation with progress percentage
//! - Roadmap templates for bulk-populating the tracker
//! - Backup export/import of all data
//! - Best-effort demo API integration with debounced, cancellable search
//!
//! # Example
//!
//! ```ignore
//! use tech_tracker::store::TechStore;
//! use tech_tracker::types::NewTechnology;
//!
//! fn main() -> anyhow::Result<()> {
//!     let store = TechStore::new()?;
//!     let record = store.add(NewTechnology {
//!         title: "Rust".to_string(),
//!         ..Default::default()
//!     })?;
//!     println!("Added #{}", record.id);
//!     Ok(())
//! }
//! ```

// Core modules (order matters for cross-module dependencies)
pub mod types;
pub mod error;
pub mod config;
pub mod store; // Must come before roadmap since roadmap depends on the store
pub mod stats;
pub mod roadmap;
pub mod settings;
pub mod api;
pub mod cli;

// Re-export commonly used types for convenience
pub use error::{Result, TrackerError};

pub use types::{
    Category, NewTechnology, Source, Status, StatusFilter, TechnologyRecord,
};

pub use store::{backup, FieldPatch, TechStore};

pub use stats::{recommendations, summarize, Summary};

pub use settings::{Settings, SettingsStore, Theme};

pub use api::{
    search::DebouncedSearch,
    DemoApiClient, SearchHit, TechSearch,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get the library info
pub fn info() -> String {
    format!("{} v{} - Technology Learning Progress Library", NAME, VERSION)
}
