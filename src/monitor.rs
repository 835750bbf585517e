//! Monitoring Loop
//!
//! Drives the scan → diff → notify → persist → sleep cycle. The loop is
//! single-threaded and fully synchronous: one cycle always completes before
//! the sleep begins and no cycle overlaps another. Only modifications reach
//! the notifier; additions and deletions are logged as informational.

use crate::config::MonitorConfig;
use crate::diff::{diff, ChangeSet};
use crate::error::MonitorError;
use crate::notifier::Notifier;
use crate::snapshot::walker::WalkerConfig;
use crate::snapshot::{Fingerprint, Snapshot, SnapshotBuilder};
use crate::store::SnapshotStore;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Granularity of the interval sleep; the stop flag is checked between slices.
const SLEEP_SLICE: Duration = Duration::from_millis(100);

/// A modified path with its fingerprints before and after.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModifiedEntry {
    pub path: String,
    pub previous: Fingerprint,
    pub current: Fingerprint,
}

/// Outcome of one full cycle.
#[derive(Debug, Clone)]
pub struct CycleReport {
    /// When the scan started
    pub scanned_at: DateTime<Utc>,
    /// Files captured in the new snapshot
    pub file_count: usize,
    /// Added/deleted/modified partition against the previous baseline
    pub changes: ChangeSet,
    /// Modified paths with previous and current fingerprints, sorted by path
    pub modified_detail: Vec<ModifiedEntry>,
    /// Whether the notifier was invoked and succeeded
    pub notified: bool,
    /// Whether the snapshot was persisted
    pub persisted: bool,
}

/// Handle for requesting a graceful stop from another thread.
///
/// The flag is honored between cycles and between sleep slices; a cycle in
/// flight always completes.
#[derive(Clone)]
pub struct StopHandle(Arc<RwLock<bool>>);

impl StopHandle {
    pub fn stop(&self) {
        *self.0.write() = true;
    }
}

/// The monitoring loop and its in-memory baseline.
pub struct Monitor {
    root: PathBuf,
    interval: Duration,
    walker_config: WalkerConfig,
    store: SnapshotStore,
    notifier: Box<dyn Notifier>,
    baseline: Snapshot,
    stopped: Arc<RwLock<bool>>,
}

impl Monitor {
    /// Construct a monitor.
    ///
    /// Performs the one-time startup precondition check: the monitored root
    /// must exist and be a directory. The root is canonicalized once so every
    /// snapshot key is a canonical absolute path. The baseline is loaded from
    /// the store, failing open to an empty snapshot when the store is
    /// unreadable or malformed (first-cycle semantics; the resulting burst of
    /// additions is correct, not spurious).
    pub fn new(config: &MonitorConfig, notifier: Box<dyn Notifier>) -> Result<Self, MonitorError> {
        if !config.root.exists() {
            return Err(MonitorError::RootMissing(config.root.clone()));
        }
        if !config.root.is_dir() {
            return Err(MonitorError::RootNotDirectory(config.root.clone()));
        }
        let root = dunce::canonicalize(&config.root)
            .map_err(|e| MonitorError::Config(format!("failed to resolve root: {}", e)))?;

        let store = SnapshotStore::new(&config.store_path);
        let baseline = match store.load() {
            Ok(snapshot) => {
                info!(entries = snapshot.len(), "Loaded previous snapshot");
                snapshot
            }
            Err(e) => {
                warn!(error = %e, "Snapshot store unusable, starting from an empty baseline");
                Snapshot::new()
            }
        };

        let walker_config = WalkerConfig {
            follow_symlinks: config.follow_symlinks,
            ignore_patterns: config.ignore_patterns.clone(),
            exclude_paths: store_exclusions(&config.store_path),
        };

        Ok(Self {
            root,
            interval: Duration::from_secs(config.interval_secs),
            walker_config,
            store,
            notifier,
            baseline,
            stopped: Arc::new(RwLock::new(false)),
        })
    }

    /// The canonical monitored root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The current in-memory baseline
    pub fn baseline(&self) -> &Snapshot {
        &self.baseline
    }

    /// Handle for stopping the loop from another thread
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle(Arc::clone(&self.stopped))
    }

    /// Run one full cycle: build → diff → notify → persist.
    ///
    /// Never fails: per-file read errors shrink the snapshot, a failed alert
    /// or a failed persist is logged and the cycle completes. The new
    /// snapshot becomes the baseline for the next cycle regardless of
    /// persistence outcome: after a failed save the in-memory state stays
    /// authoritative, though a restart would lose it.
    pub fn run_cycle(&mut self) -> CycleReport {
        let scanned_at = Utc::now();

        let current = SnapshotBuilder::new(self.root.clone())
            .with_walker_config(self.walker_config.clone())
            .build();

        let changes = diff(&self.baseline, &current);

        for path in &changes.added {
            info!(path = %path, "New file detected");
        }
        for path in &changes.deleted {
            info!(path = %path, "File deleted");
        }

        let mut modified_detail = Vec::with_capacity(changes.modified.len());
        for path in &changes.modified {
            // Modified paths exist in both snapshots by construction
            if let (Some(previous), Some(current_fp)) =
                (self.baseline.get(path), current.get(path))
            {
                warn!(
                    path = %path,
                    previous = %previous,
                    current = %current_fp,
                    "File modified"
                );
                modified_detail.push(ModifiedEntry {
                    path: path.clone(),
                    previous: previous.clone(),
                    current: current_fp.clone(),
                });
            }
        }
        modified_detail.sort_by(|a, b| a.path.cmp(&b.path));

        let notified = if changes.has_modifications() {
            let mut modified: Vec<String> = changes.modified.iter().cloned().collect();
            modified.sort_unstable();
            match self.notifier.notify(&modified) {
                Ok(()) => true,
                Err(e) => {
                    error!(error = %e, "Alert delivery failed, continuing");
                    false
                }
            }
        } else {
            false
        };

        let persisted = match self.store.save(&current) {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, "Failed to persist snapshot, in-memory baseline remains authoritative");
                false
            }
        };

        let file_count = current.len();
        self.baseline = current;

        CycleReport {
            scanned_at,
            file_count,
            changes,
            modified_detail,
            notified,
            persisted,
        }
    }

    /// Run cycles until stopped.
    pub fn run(&mut self) {
        info!(
            root = %self.root.display(),
            interval_secs = self.interval.as_secs(),
            "Monitoring started"
        );

        loop {
            if *self.stopped.read() {
                break;
            }

            let report = self.run_cycle();
            if report.changes.is_empty() {
                info!(file_count = report.file_count, "No changes detected");
            }

            self.sleep_interval();
            if *self.stopped.read() {
                break;
            }
        }

        info!("Monitoring stopped");
    }

    /// Plain delay between cycles; long cycles push later cycles back rather
    /// than accumulating skipped ticks.
    fn sleep_interval(&self) {
        let mut remaining = self.interval;
        while !remaining.is_zero() {
            if *self.stopped.read() {
                return;
            }
            let nap = remaining.min(SLEEP_SLICE);
            std::thread::sleep(nap);
            remaining -= nap;
        }
    }
}

/// Paths the walker must skip so the store never shows up in its own diffs.
///
/// The store file usually does not exist yet on first run, so the exclusion
/// list carries the configured path, its absolute form, and the
/// parent-canonicalized form.
fn store_exclusions(store_path: &Path) -> Vec<PathBuf> {
    let mut paths = vec![store_path.to_path_buf()];

    if let Ok(cwd) = std::env::current_dir() {
        if store_path.is_relative() {
            paths.push(cwd.join(store_path));
        }
    }

    if let (Some(parent), Some(name)) = (store_path.parent(), store_path.file_name()) {
        if let Ok(canonical_parent) = dunce::canonicalize(parent) {
            paths.push(canonical_parent.join(name));
        }
    }

    paths.dedup();
    paths
}
