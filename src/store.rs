//! Snapshot persistence
//!
//! The persisted snapshot is the sole durable state: a single UTF-8 JSON
//! object mapping each absolute file path to its 64-character lowercase hex
//! fingerprint, overwritten wholesale after every cycle. The format
//! round-trips exactly: `load` after `save` yields an equal snapshot.

use crate::error::StoreError;
use crate::snapshot::Snapshot;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Load and save the most recent snapshot at a fixed path.
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted snapshot.
    ///
    /// An absent store file is the expected state on first run and loads as
    /// an empty snapshot, not an error. An unreadable or malformed file is an
    /// error; the caller decides the fail-open policy.
    pub fn load(&self) -> Result<Snapshot, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No snapshot store yet, starting empty");
                return Ok(Snapshot::new());
            }
            Err(source) => {
                return Err(StoreError::Load {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&contents).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    /// Persist a snapshot, fully overwriting the previous store contents.
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StoreError::Persist {
                    path: self.path.clone(),
                    source,
                })?;
            }
        }

        let json = serde_json::to_string_pretty(snapshot).map_err(|source| {
            StoreError::Persist {
                path: self.path.clone(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidData, source),
            }
        })?;

        fs::write(&self.path, json).map_err(|source| StoreError::Persist {
            path: self.path.clone(),
            source,
        })?;

        debug!(path = %self.path.display(), entries = snapshot.len(), "Persisted snapshot");
        Ok(())
    }
}
