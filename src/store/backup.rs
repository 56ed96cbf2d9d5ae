//! Backup export/import
//!
//! A backup file bundles both durable slots:
//! `{exportedAt, data: {technologies: [...], settings: {...}}}`.
//! Importing overwrites both slots wholesale; the caller confirms first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

use crate::error::{Result, TrackerError};
use crate::settings::{Settings, SettingsStore};
use crate::store::TechStore;
use crate::types::TechnologyRecord;

/// On-disk backup document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportFile {
    pub exported_at: DateTime<Utc>,
    pub data: ExportData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportData {
    pub technologies: Vec<TechnologyRecord>,
    pub settings: Settings,
}

/// Default backup file name for today, `tech-tracker-backup-YYYY-MM-DD.json`
pub fn default_backup_name() -> String {
    format!("tech-tracker-backup-{}.json", Utc::now().format("%Y-%m-%d"))
}

/// Write both slots to a backup file
pub fn export_to(store: &TechStore, settings: &SettingsStore, path: &Path) -> Result<ExportFile> {
    let export = ExportFile {
        exported_at: Utc::now(),
        data: ExportData {
            technologies: store.list()?,
            settings: settings.load()?,
        },
    };
    let json = serde_json::to_string_pretty(&export)?;
    std::fs::write(path, json)?;
    info!(
        "Exported {} records to {}",
        export.data.technologies.len(),
        path.display()
    );
    Ok(export)
}

/// Parse and validate a backup file without touching the slots
///
/// Statuses are coerced at the serde boundary and unknown categories kept
/// verbatim; duplicate ids violate the uniqueness invariant and are rejected
/// before anything is overwritten.
pub fn read_backup(path: &Path) -> Result<ExportFile> {
    let contents = std::fs::read_to_string(path)?;
    let export: ExportFile = serde_json::from_str(&contents)
        .map_err(|e| TrackerError::StorageCorrupt(format!("{}: {}", path.display(), e)))?;

    let mut seen = HashSet::new();
    for record in &export.data.technologies {
        if !seen.insert(record.id) {
            return Err(TrackerError::Validation(format!(
                "backup contains duplicate id {}",
                record.id
            )));
        }
    }
    Ok(export)
}

/// Overwrite both slots from a backup file. Returns how many records landed.
pub fn import_from(store: &TechStore, settings: &SettingsStore, path: &Path) -> Result<usize> {
    let export = read_backup(path)?;
    store.replace_all(&export.data.technologies)?;
    settings.save(&export.data.settings)?;
    info!(
        "Imported {} records from {}",
        export.data.technologies.len(),
        path.display()
    );
    Ok(export.data.technologies.len())
}
