//! Unreadable files are excluded from snapshots, not fatal to scans

#![cfg(unix)]

use super::test_utils::monitor_with_recorder;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tempfile::TempDir;

fn lock(path: &Path) {
    fs::set_permissions(path, fs::Permissions::from_mode(0o000)).unwrap();
}

fn unlock(path: &Path) {
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// Mode bits do not stop a privileged process from reading; these tests can
/// only run where dropping permissions actually makes the file unreadable.
fn permissions_effective(path: &Path) -> bool {
    lock(path);
    let readable = fs::File::open(path).is_ok();
    unlock(path);
    !readable
}

/// A file that becomes unreadable is treated as deleted even though it still
/// physically exists, and deletions never alert.
#[test]
fn test_unreadable_file_is_treated_as_deleted() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("tree");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("open.txt"), "readable").unwrap();
    let locked = root.join("locked.txt");
    fs::write(&locked, "soon unreadable").unwrap();
    let store_path = temp_dir.path().join("snapshot.json");

    if !permissions_effective(&locked) {
        eprintln!("skipping: process ignores file permissions");
        return;
    }

    let (mut monitor, recorder) = monitor_with_recorder(&root, &store_path);
    let first = monitor.run_cycle();
    assert_eq!(first.file_count, 2);

    lock(&locked);
    let second = monitor.run_cycle();
    unlock(&locked);

    assert_eq!(second.file_count, 1);
    assert_eq!(second.changes.deleted.len(), 1);
    assert!(second.changes.modified.is_empty());
    assert!(!second.notified);
    assert!(recorder.calls().is_empty());
}

/// A file that was unreadable on the previous cycle and becomes readable
/// again reappears as an addition.
#[test]
fn test_file_becoming_readable_reappears_as_added() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("tree");
    fs::create_dir(&root).unwrap();
    let flaky = root.join("flaky.txt");
    fs::write(&flaky, "contents").unwrap();
    let store_path = temp_dir.path().join("snapshot.json");

    if !permissions_effective(&flaky) {
        eprintln!("skipping: process ignores file permissions");
        return;
    }

    let (mut monitor, recorder) = monitor_with_recorder(&root, &store_path);
    monitor.run_cycle();

    lock(&flaky);
    let while_locked = monitor.run_cycle();
    assert_eq!(while_locked.changes.deleted.len(), 1);

    unlock(&flaky);
    let after_unlock = monitor.run_cycle();
    assert_eq!(after_unlock.changes.added.len(), 1);
    assert!(after_unlock.changes.modified.is_empty());
    assert!(recorder.calls().is_empty());
}

/// An unreadable subdirectory is skipped without aborting the scan.
#[test]
fn test_unreadable_directory_does_not_abort_scan() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("tree");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("visible.txt"), "ok").unwrap();
    let closed_dir = root.join("closed");
    fs::create_dir(&closed_dir).unwrap();
    let hidden = closed_dir.join("hidden.txt");
    fs::write(&hidden, "unreachable").unwrap();
    let store_path = temp_dir.path().join("snapshot.json");

    if !permissions_effective(&hidden) {
        eprintln!("skipping: process ignores file permissions");
        return;
    }

    lock(&closed_dir);
    let (mut monitor, _recorder) = monitor_with_recorder(&root, &store_path);
    let report = monitor.run_cycle();
    unlock(&closed_dir);

    assert_eq!(report.file_count, 1);
}
