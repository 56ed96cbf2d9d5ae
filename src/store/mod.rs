//! Record Store - persistent storage for technology records
//!
//! Owns the single durable slot holding the full record list. Every mutating
//! operation reads the slot, changes the in-memory list, and writes the whole
//! list back in one call; there is no partial persistence and no transaction
//! log. Independent store instances re-read the slot on every operation, so
//! each one observes the last committed write.

pub mod backup;

use anyhow::Context;
use chrono::Utc;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{Result, TrackerError};
use crate::types::{Category, NewTechnology, Status, StatusFilter, TechnologyRecord};

/// File name of the record slot inside the data directory
pub const RECORDS_FILE: &str = "technologies.json";

/// Partial update for `update_fields`; `None` leaves a field untouched
#[derive(Debug, Clone, Default)]
pub struct FieldPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub category: Option<Category>,
}

impl FieldPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.notes.is_none()
            && self.category.is_none()
    }
}

/// Summary of what the slot currently holds
#[derive(Debug, Clone)]
pub struct StorageInfo {
    pub records: usize,
    pub with_notes: usize,
    pub bytes: u64,
}

/// Persistent technology store backed by a single JSON slot
pub struct TechStore {
    path: PathBuf,
}

impl TechStore {
    /// Create a store at the default data location
    pub fn new() -> anyhow::Result<Self> {
        let data_dir = crate::config::data_dir()?;
        std::fs::create_dir_all(&data_dir).context("Failed to create data directory")?;
        Ok(Self {
            path: data_dir.join(RECORDS_FILE),
        })
    }

    /// Create with a custom slot path
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// All records in insertion order
    ///
    /// A missing or unparseable slot yields the empty list; corruption is
    /// logged, never propagated.
    pub fn list(&self) -> Result<Vec<TechnologyRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        match serde_json::from_str(&contents) {
            Ok(records) => Ok(records),
            Err(e) => {
                warn!("Record slot at {} is corrupt ({}), treating as empty", self.path.display(), e);
                Ok(Vec::new())
            }
        }
    }

    /// Create a record
    ///
    /// Validates the title, assigns the next unique id, stamps the creation
    /// time, appends, persists. Returns the created record.
    pub fn add(&self, input: NewTechnology) -> Result<TechnologyRecord> {
        let title = input.title.trim().to_string();
        if title.is_empty() {
            return Err(TrackerError::Validation("title must not be empty".to_string()));
        }

        let mut records = self.list()?;
        let record = TechnologyRecord {
            id: next_id(&records),
            title,
            description: input.description.trim().to_string(),
            notes: input.notes.trim().to_string(),
            category: input.category,
            status: input.status,
            source: crate::types::Source::Local,
            created_at: Some(Utc::now()),
            imported_at: None,
        };
        records.push(record.clone());
        self.persist(&records)?;
        info!("Added technology #{}: {}", record.id, record.title);
        Ok(record)
    }

    /// Create a record from an imported descriptor
    ///
    /// Imported records get a timestamp-flavored id; on collision the id is
    /// bumped past the current maximum so uniqueness always holds.
    pub fn import(&self, input: NewTechnology) -> Result<TechnologyRecord> {
        let title = input.title.trim().to_string();
        if title.is_empty() {
            return Err(TrackerError::Validation("title must not be empty".to_string()));
        }

        let mut records = self.list()?;
        let candidate = Utc::now().timestamp_millis();
        let id = if records.iter().any(|r| r.id == candidate) {
            next_id(&records).max(candidate + 1)
        } else {
            candidate
        };
        let record = TechnologyRecord {
            id,
            title,
            description: input.description.trim().to_string(),
            notes: input.notes.trim().to_string(),
            category: input.category,
            status: input.status,
            source: crate::types::Source::Imported,
            created_at: None,
            imported_at: Some(Utc::now()),
        };
        records.push(record.clone());
        self.persist(&records)?;
        info!("Imported technology #{}: {}", record.id, record.title);
        Ok(record)
    }

    /// Replace the status of the matching record; no-op if the id is absent.
    /// Returns whether a record was updated.
    pub fn update_status(&self, id: i64, status: Status) -> Result<bool> {
        let mut records = self.list()?;
        match records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.status = status;
                self.persist(&records)?;
                Ok(true)
            }
            None => {
                debug!("update_status: no record with id {}", id);
                Ok(false)
            }
        }
    }

    /// Advance the matching record one step along the fixed status cycle.
    /// Returns the new status, or `None` if the id is absent.
    pub fn advance_status(&self, id: i64) -> Result<Option<Status>> {
        let mut records = self.list()?;
        match records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                let next = record.status.next();
                record.status = next;
                self.persist(&records)?;
                Ok(Some(next))
            }
            None => {
                debug!("advance_status: no record with id {}", id);
                Ok(None)
            }
        }
    }

    /// Replace the notes of the matching record; no-op if absent
    pub fn update_notes(&self, id: i64, notes: &str) -> Result<bool> {
        let mut records = self.list()?;
        match records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.notes = notes.to_string();
                self.persist(&records)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Merge the given fields into the matching record; no-op if absent
    pub fn update_fields(&self, id: i64, patch: FieldPatch) -> Result<bool> {
        if let Some(title) = &patch.title {
            if title.trim().is_empty() {
                return Err(TrackerError::Validation("title must not be empty".to_string()));
            }
        }

        let mut records = self.list()?;
        match records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                if let Some(title) = patch.title {
                    record.title = title.trim().to_string();
                }
                if let Some(description) = patch.description {
                    record.description = description;
                }
                if let Some(notes) = patch.notes {
                    record.notes = notes;
                }
                if let Some(category) = patch.category {
                    record.category = category;
                }
                self.persist(&records)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove the matching record; no-op if absent
    pub fn remove(&self, id: i64) -> Result<bool> {
        let mut records = self.list()?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            debug!("remove: no record with id {}", id);
            return Ok(false);
        }
        self.persist(&records)?;
        info!("Removed technology #{}", id);
        Ok(true)
    }

    /// Read-side filter over the current list
    pub fn filter(&self, query: &str, status: StatusFilter) -> Result<Vec<TechnologyRecord>> {
        let records = self.list()?;
        Ok(filter_records(&records, query, status).into_iter().cloned().collect())
    }

    /// Fetch one record for the detail view
    pub fn get(&self, id: i64) -> Result<TechnologyRecord> {
        self.list()?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or(TrackerError::NotFound(id))
    }

    /// Set every record to the given status. Returns how many were changed.
    pub fn set_all_status(&self, status: Status) -> Result<usize> {
        let mut records = self.list()?;
        let changed = records.iter().filter(|r| r.status != status).count();
        if changed == 0 {
            return Ok(0);
        }
        for record in &mut records {
            record.status = status;
        }
        self.persist(&records)?;
        info!("Set {} records to {}", changed, status);
        Ok(changed)
    }

    /// Overwrite the slot with the given list (used by backup import)
    pub fn replace_all(&self, records: &[TechnologyRecord]) -> Result<()> {
        self.persist(records)
    }

    /// What the slot currently holds
    pub fn storage_info(&self) -> Result<StorageInfo> {
        let records = self.list()?;
        let bytes = std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0);
        Ok(StorageInfo {
            records: records.len(),
            with_notes: records.iter().filter(|r| !r.notes.is_empty()).count(),
            bytes,
        })
    }

    /// Delete the slot file entirely (used by the reset flow)
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    /// Path of the underlying slot
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    // The single write call below is the only durability point; the design
    // trusts it to be all-or-nothing at the storage layer's granularity.
    fn persist(&self, records: &[TechnologyRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Next unique id: max(existing) + 1, starting from 1
fn next_id(records: &[TechnologyRecord]) -> i64 {
    records.iter().map(|r| r.id).max().unwrap_or(0) + 1
}

/// Pure filter: case-insensitive containment on title or description
/// (empty query matches all), AND status equality unless the filter is "all"
pub fn filter_records<'a>(
    records: &'a [TechnologyRecord],
    query: &str,
    status: StatusFilter,
) -> Vec<&'a TechnologyRecord> {
    let query = query.to_lowercase();
    records
        .iter()
        .filter(|r| {
            let matches_query = query.is_empty()
                || r.title.to_lowercase().contains(&query)
                || r.description.to_lowercase().contains(&query);
            matches_query && status.matches(r.status)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Source;
    use tempfile::tempdir;

    fn test_store(dir: &tempfile::TempDir) -> TechStore {
        TechStore::with_path(dir.path().join(RECORDS_FILE))
    }

    fn new_tech(title: &str) -> NewTechnology {
        NewTechnology {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_assigns_distinct_ids() {
        let dir = tempdir().unwrap();
        let store = test_store(&dir);
        let mut ids = Vec::new();
        for i in 0..10 {
            ids.push(store.add(new_tech(&format!("Tech {}", i))).unwrap().id);
        }
        let mut deduped = ids.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), ids.len());
    }

    #[test]
    fn test_id_not_reused_after_deletion() {
        let dir = tempdir().unwrap();
        let store = test_store(&dir);
        store.add(new_tech("A")).unwrap();
        let b = store.add(new_tech("B")).unwrap();
        assert_eq!(b.id, 2);
        store.remove(2).unwrap();
        // max(existing) + 1 over the remaining list
        let c = store.add(new_tech("C")).unwrap();
        assert_eq!(c.id, 2);
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn test_add_rejects_empty_title() {
        let dir = tempdir().unwrap();
        let store = test_store(&dir);
        let err = store.add(new_tech("   ")).unwrap_err();
        assert!(matches!(err, TrackerError::Validation(_)));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_add_advance_remove_scenario() {
        let dir = tempdir().unwrap();
        let store = test_store(&dir);
        let record = store
            .add(NewTechnology {
                title: "React".to_string(),
                description: "UI lib".to_string(),
                category: Category::Frontend,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(record.id, 1);
        assert_eq!(record.status, Status::NotStarted);
        assert_eq!(store.list().unwrap().len(), 1);

        let next = store.advance_status(1).unwrap();
        assert_eq!(next, Some(Status::InProgress));
        assert_eq!(store.get(1).unwrap().status, Status::InProgress);

        assert!(store.remove(1).unwrap());
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_mutations_on_missing_id_are_noops() {
        let dir = tempdir().unwrap();
        let store = test_store(&dir);
        store.add(new_tech("A")).unwrap();

        assert!(!store.update_status(99, Status::Completed).unwrap());
        assert!(store.advance_status(99).unwrap().is_none());
        assert!(!store.update_notes(99, "x").unwrap());
        assert!(!store.remove(99).unwrap());
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_get_missing_id_is_not_found() {
        let dir = tempdir().unwrap();
        let store = test_store(&dir);
        assert!(matches!(store.get(7), Err(TrackerError::NotFound(7))));
    }

    #[test]
    fn test_update_notes_and_fields() {
        let dir = tempdir().unwrap();
        let store = test_store(&dir);
        let record = store.add(new_tech("Rust")).unwrap();

        assert!(store.update_notes(record.id, "ownership first").unwrap());
        assert_eq!(store.get(record.id).unwrap().notes, "ownership first");

        assert!(store
            .update_fields(
                record.id,
                FieldPatch {
                    title: Some("Rust lang".to_string()),
                    category: Some(Category::Backend),
                    ..Default::default()
                },
            )
            .unwrap());
        let updated = store.get(record.id).unwrap();
        assert_eq!(updated.title, "Rust lang");
        assert_eq!(updated.category, Category::Backend);
        // untouched fields survive the merge
        assert_eq!(updated.notes, "ownership first");
    }

    #[test]
    fn test_update_fields_rejects_empty_title() {
        let dir = tempdir().unwrap();
        let store = test_store(&dir);
        let record = store.add(new_tech("Rust")).unwrap();
        let err = store
            .update_fields(
                record.id,
                FieldPatch {
                    title: Some("  ".to_string()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, TrackerError::Validation(_)));
        assert_eq!(store.get(record.id).unwrap().title, "Rust");
    }

    #[test]
    fn test_corrupt_slot_loads_as_empty() {
        let dir = tempdir().unwrap();
        let store = test_store(&dir);
        std::fs::write(store.path(), "{ this is not json").unwrap();
        assert!(store.list().unwrap().is_empty());
        // the store stays usable
        store.add(new_tech("A")).unwrap();
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_independent_instances_share_the_slot() {
        let dir = tempdir().unwrap();
        let first = test_store(&dir);
        let second = test_store(&dir);
        first.add(new_tech("A")).unwrap();
        assert_eq!(second.list().unwrap().len(), 1);
        second.add(new_tech("B")).unwrap();
        assert_eq!(first.list().unwrap().len(), 2);
    }

    #[test]
    fn test_filter_empty_query_all_is_identity() {
        let dir = tempdir().unwrap();
        let store = test_store(&dir);
        for title in ["C", "A", "B"] {
            store.add(new_tech(title)).unwrap();
        }
        let all = store.list().unwrap();
        let filtered = store.filter("", StatusFilter::All).unwrap();
        assert_eq!(filtered, all);
    }

    #[test]
    fn test_filter_query_and_status() {
        let dir = tempdir().unwrap();
        let store = test_store(&dir);
        store
            .add(NewTechnology {
                title: "React".to_string(),
                description: "UI library".to_string(),
                ..Default::default()
            })
            .unwrap();
        store
            .add(NewTechnology {
                title: "Axum".to_string(),
                description: "Web framework with a UI-free core".to_string(),
                status: Status::InProgress,
                ..Default::default()
            })
            .unwrap();

        // case-insensitive containment on title OR description
        let hits = store.filter("ui", StatusFilter::All).unwrap();
        assert_eq!(hits.len(), 2);

        let hits = store.filter("ui", StatusFilter::Only(Status::InProgress)).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Axum");

        assert!(store.filter("zig", StatusFilter::All).unwrap().is_empty());
    }

    #[test]
    fn test_import_ids_stay_unique() {
        let dir = tempdir().unwrap();
        let store = test_store(&dir);
        // same-millisecond imports must not collide
        let a = store.import(new_tech("HTML & CSS")).unwrap();
        let b = store.import(new_tech("JavaScript")).unwrap();
        let c = store.import(new_tech("React")).unwrap();
        assert_ne!(a.id, b.id);
        assert_ne!(b.id, c.id);
        assert_ne!(a.id, c.id);
        assert_eq!(a.source, Source::Imported);
        assert!(a.imported_at.is_some());
        assert!(a.created_at.is_none());
    }

    #[test]
    fn test_set_all_status() {
        let dir = tempdir().unwrap();
        let store = test_store(&dir);
        store.add(new_tech("A")).unwrap();
        store
            .add(NewTechnology {
                title: "B".to_string(),
                status: Status::Completed,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(store.set_all_status(Status::Completed).unwrap(), 1);
        assert!(store
            .list()
            .unwrap()
            .iter()
            .all(|r| r.status == Status::Completed));
    }

    #[test]
    fn test_storage_info() {
        let dir = tempdir().unwrap();
        let store = test_store(&dir);
        store.add(new_tech("A")).unwrap();
        store
            .add(NewTechnology {
                title: "B".to_string(),
                notes: "remember this".to_string(),
                ..Default::default()
            })
            .unwrap();
        let info = store.storage_info().unwrap();
        assert_eq!(info.records, 2);
        assert_eq!(info.with_notes, 1);
        assert!(info.bytes > 0);
    }
}
