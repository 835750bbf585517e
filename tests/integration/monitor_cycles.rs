//! End-to-end cycle behavior: first run, modification alerts, deletions,
//! and baseline persistence across monitor restarts.

use super::test_utils::monitor_with_recorder;
use std::fs;
use tempfile::TempDir;
use vigil::store::SnapshotStore;

/// First cycle over a fresh tree: everything is added, nothing alerts,
/// and the store ends up with one entry per file.
#[test]
fn test_first_cycle_populates_store_without_alerting() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("tree");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("a.txt"), "hi").unwrap();
    fs::write(root.join("b.txt"), "bye").unwrap();
    let store_path = temp_dir.path().join("snapshot.json");

    let (mut monitor, recorder) = monitor_with_recorder(&root, &store_path);
    let report = monitor.run_cycle();

    assert_eq!(report.changes.added.len(), 2);
    assert!(report.changes.deleted.is_empty());
    assert!(report.changes.modified.is_empty());
    assert!(!report.notified);
    assert!(recorder.calls().is_empty());

    let persisted = SnapshotStore::new(&store_path).load().unwrap();
    assert_eq!(persisted.len(), 2);
}

/// Modifying a file between cycles alerts with exactly the modified path.
#[test]
fn test_modification_alerts_with_modified_path() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("tree");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("a.txt"), "original").unwrap();
    fs::write(root.join("b.txt"), "untouched").unwrap();
    let store_path = temp_dir.path().join("snapshot.json");

    let (mut monitor, recorder) = monitor_with_recorder(&root, &store_path);
    monitor.run_cycle();

    fs::write(root.join("a.txt"), "tampered").unwrap();
    let report = monitor.run_cycle();

    assert_eq!(report.changes.modified.len(), 1);
    assert!(report.notified);

    let calls = recorder.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].len(), 1);
    assert!(calls[0][0].ends_with("a.txt"));
}

/// Deleting a file is logged but never alerted; the persisted snapshot
/// shrinks accordingly.
#[test]
fn test_deletion_shrinks_snapshot_without_alerting() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("tree");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("a.txt"), "keep").unwrap();
    fs::write(root.join("b.txt"), "remove").unwrap();
    let store_path = temp_dir.path().join("snapshot.json");

    let (mut monitor, recorder) = monitor_with_recorder(&root, &store_path);
    monitor.run_cycle();

    fs::remove_file(root.join("b.txt")).unwrap();
    let report = monitor.run_cycle();

    assert_eq!(report.changes.deleted.len(), 1);
    assert!(!report.notified);
    assert!(recorder.calls().is_empty());

    let persisted = SnapshotStore::new(&store_path).load().unwrap();
    assert_eq!(persisted.len(), 1);
    let remaining: Vec<&String> = persisted.paths().collect();
    assert!(remaining[0].ends_with("a.txt"));
}

/// Added and deleted in the same cycle as a modification: only the modified
/// path reaches the notifier.
#[test]
fn test_only_modified_paths_reach_the_notifier() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("tree");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("mod.txt"), "v1").unwrap();
    fs::write(root.join("del.txt"), "going away").unwrap();
    let store_path = temp_dir.path().join("snapshot.json");

    let (mut monitor, recorder) = monitor_with_recorder(&root, &store_path);
    monitor.run_cycle();

    fs::write(root.join("mod.txt"), "v2").unwrap();
    fs::remove_file(root.join("del.txt")).unwrap();
    fs::write(root.join("new.txt"), "brand new").unwrap();
    let report = monitor.run_cycle();

    assert_eq!(report.changes.added.len(), 1);
    assert_eq!(report.changes.deleted.len(), 1);
    assert_eq!(report.changes.modified.len(), 1);

    let calls = recorder.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].len(), 1);
    assert!(calls[0][0].ends_with("mod.txt"));
}

/// A new monitor picks up the persisted baseline: an unchanged tree produces
/// an empty diff after restart.
#[test]
fn test_baseline_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("tree");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("a.txt"), "stable").unwrap();
    let store_path = temp_dir.path().join("snapshot.json");

    let (mut first, _) = monitor_with_recorder(&root, &store_path);
    first.run_cycle();
    drop(first);

    let (mut second, recorder) = monitor_with_recorder(&root, &store_path);
    let report = second.run_cycle();

    assert!(report.changes.is_empty());
    assert!(recorder.calls().is_empty());
}

/// A corrupt store fails open: the next cycle re-adds every file, which is
/// first-run semantics rather than an error.
#[test]
fn test_corrupt_store_fails_open_to_added_burst() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("tree");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("a.txt"), "content").unwrap();
    let store_path = temp_dir.path().join("snapshot.json");
    fs::write(&store_path, "{ this is not json").unwrap();

    let (mut monitor, recorder) = monitor_with_recorder(&root, &store_path);
    let report = monitor.run_cycle();

    assert_eq!(report.changes.added.len(), 1);
    assert!(report.changes.modified.is_empty());
    assert!(recorder.calls().is_empty());

    // The corrupt store was overwritten wholesale with valid state
    let persisted = SnapshotStore::new(&store_path).load().unwrap();
    assert_eq!(persisted.len(), 1);
}

/// Unchanged trees produce empty change sets cycle after cycle.
#[test]
fn test_steady_state_is_quiet() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("tree");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("a.txt"), "same").unwrap();
    let store_path = temp_dir.path().join("snapshot.json");

    let (mut monitor, recorder) = monitor_with_recorder(&root, &store_path);
    monitor.run_cycle();

    for _ in 0..3 {
        let report = monitor.run_cycle();
        assert!(report.changes.is_empty());
    }
    assert!(recorder.calls().is_empty());
}
