//! Integration tests over the public API:
//! - Record store lifecycle (add, advance, edit, remove) and filtering
//! - Statistics aggregation from stored records
//! - Roadmap import into the store
//! - Backup export/import round trip across both slots

use tech_tracker::settings::{Settings, SettingsStore, Theme};
use tech_tracker::store::{backup, TechStore, RECORDS_FILE};
use tech_tracker::types::{Category, NewTechnology, Status, StatusFilter};
use tech_tracker::{roadmap, stats};

fn store_in(dir: &tempfile::TempDir) -> TechStore {
    TechStore::with_path(dir.path().join(RECORDS_FILE))
}

// =====================================================================
// RECORD STORE LIFECYCLE
// =====================================================================

#[test]
fn test_full_record_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    let react = store
        .add(NewTechnology {
            title: "React".to_string(),
            description: "UI lib".to_string(),
            category: Category::Frontend,
            ..Default::default()
        })
        .unwrap();
    assert_eq!(react.id, 1);
    assert_eq!(react.status, Status::NotStarted);

    // advance walks the fixed cycle
    assert_eq!(store.advance_status(react.id).unwrap(), Some(Status::InProgress));
    assert_eq!(store.advance_status(react.id).unwrap(), Some(Status::Completed));
    assert_eq!(store.advance_status(react.id).unwrap(), Some(Status::NotStarted));

    // edits persist across store instances (slot is the source of truth)
    store.update_notes(react.id, "hooks next").unwrap();
    let reread = store_in(&dir);
    assert_eq!(reread.get(react.id).unwrap().notes, "hooks next");

    assert!(store.remove(react.id).unwrap());
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn test_ids_are_pairwise_distinct_across_adds() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    let mut ids: Vec<i64> = (0..25)
        .map(|i| {
            store
                .add(NewTechnology {
                    title: format!("Tech {}", i),
                    ..Default::default()
                })
                .unwrap()
                .id
        })
        .collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 25);
}

#[test]
fn test_filter_identity_and_combinations() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store
        .add(NewTechnology {
            title: "React".to_string(),
            description: "UI library".to_string(),
            category: Category::Frontend,
            ..Default::default()
        })
        .unwrap();
    store
        .add(NewTechnology {
            title: "Postgres".to_string(),
            description: "Relational database".to_string(),
            category: Category::Database,
            status: Status::InProgress,
            ..Default::default()
        })
        .unwrap();

    // empty query + "all" is the identity, in order
    let all = store.list().unwrap();
    assert_eq!(store.filter("", StatusFilter::All).unwrap(), all);

    // query is case-insensitive over title and description
    let hits = store.filter("RELATIONAL", StatusFilter::All).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Postgres");

    // status filter composes with the query
    assert!(store
        .filter("react", StatusFilter::Only(Status::InProgress))
        .unwrap()
        .is_empty());
}

// =====================================================================
// STATISTICS
// =====================================================================

#[test]
fn test_summary_from_stored_records() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    for status in [Status::Completed, Status::Completed, Status::InProgress] {
        store
            .add(NewTechnology {
                title: format!("{} tech", status),
                category: Category::Frontend,
                status,
                ..Default::default()
            })
            .unwrap();
    }

    let summary = stats::summarize(&store.list().unwrap());
    assert_eq!(summary.total, 3);
    assert_eq!(summary.completed, 2);
    assert_eq!(summary.in_progress, 1);
    assert_eq!(summary.not_started, 0);
    assert_eq!(summary.progress_percent, 67);
    assert_eq!(summary.by_category.get("frontend"), Some(&3));
    assert_eq!(
        summary.completed + summary.in_progress + summary.not_started,
        summary.total
    );
}

// =====================================================================
// ROADMAP IMPORT
// =====================================================================

#[test]
fn test_roadmap_import_then_stats() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    let outcome = roadmap::import_roadmap(&store, "frontend").unwrap();
    assert_eq!(outcome.imported.len(), 5);
    assert_eq!(outcome.failed, 0);

    let summary = stats::summarize(&store.list().unwrap());
    assert_eq!(summary.total, 5);
    assert_eq!(summary.not_started, 5);
    assert_eq!(summary.progress_percent, 0);
    assert_eq!(summary.by_category.get("frontend"), Some(&5));
}

// =====================================================================
// BACKUP ROUND TRIP
// =====================================================================

#[test]
fn test_backup_round_trip_preserves_everything() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    let settings_store = SettingsStore::with_path(dir.path().join("settings.json"));

    roadmap::import_roadmap(&store, "backend").unwrap();
    store
        .add(NewTechnology {
            title: "Rust".to_string(),
            notes: "ownership, borrowing".to_string(),
            category: Category::Backend,
            status: Status::InProgress,
            ..Default::default()
        })
        .unwrap();
    settings_store
        .save(&Settings {
            username: "Ada".to_string(),
            theme: Theme::Dark,
            ..Default::default()
        })
        .unwrap();

    let before = store.list().unwrap();
    let backup_path = dir.path().join("backup.json");
    backup::export_to(&store, &settings_store, &backup_path).unwrap();

    // wipe both slots, then restore
    store.replace_all(&[]).unwrap();
    settings_store.save(&Settings::default()).unwrap();
    backup::import_from(&store, &settings_store, &backup_path).unwrap();

    // same ids, fields and order as before the wipe
    assert_eq!(store.list().unwrap(), before);
    let restored = settings_store.load().unwrap();
    assert_eq!(restored.username, "Ada");
    assert_eq!(restored.theme, Theme::Dark);
}
