//! Snapshot builder: walk a tree and fingerprint every readable file

use crate::snapshot::hasher;
use crate::snapshot::walker::{Walker, WalkerConfig};
use crate::snapshot::Snapshot;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Builds a complete snapshot of the monitored tree.
pub struct SnapshotBuilder {
    root: PathBuf,
    walker_config: Option<WalkerConfig>,
}

impl SnapshotBuilder {
    /// Create a new builder for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            walker_config: None,
        }
    }

    /// Set walker config (ignore patterns, excluded paths). When set, the
    /// walker uses this config instead of the default.
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = Some(config);
        self
    }

    /// Build a fresh snapshot of the tree.
    ///
    /// Every regular file reachable from the root is fingerprinted. Files
    /// that are unreadable (vanished between enumeration and hashing,
    /// permission denied) are logged and excluded; the scan never aborts on
    /// a per-file failure. A tree that mutates concurrently with the walk
    /// produces an inconsistent-but-plausible point-in-time view.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn build(&self) -> Snapshot {
        let start = Instant::now();

        let walker = match &self.walker_config {
            Some(config) => Walker::with_config(self.root.clone(), config.clone()),
            None => Walker::new(self.root.clone()),
        };
        let files = walker.walk();
        debug!(file_count = files.len(), "Walked monitored tree");

        let mut snapshot = Snapshot::new();
        let mut skipped = 0usize;

        for path in files {
            match hasher::fingerprint(&path) {
                Ok(fingerprint) => {
                    snapshot.insert(path.to_string_lossy().into_owned(), fingerprint);
                }
                Err(e) => {
                    skipped += 1;
                    warn!(path = %path.display(), error = %e.source, "Skipping unreadable file");
                }
            }
        }

        info!(
            file_count = snapshot.len(),
            skipped,
            duration_ms = start.elapsed().as_millis(),
            "Snapshot build completed"
        );

        snapshot
    }
}
