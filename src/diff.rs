//! Snapshot diffing: partition paths into added, deleted, and modified sets

use crate::snapshot::Snapshot;
use std::collections::HashSet;

/// The partition of paths between two snapshots.
///
/// The three sets are disjoint. Paths present in both snapshots with equal
/// fingerprints are unchanged and excluded entirely. No ordering is imposed
/// on the sets; callers that render them must sort explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// In current, not in previous
    pub added: HashSet<String>,
    /// In previous, not in current
    pub deleted: HashSet<String>,
    /// In both, fingerprints differ
    pub modified: HashSet<String>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty() && self.modified.is_empty()
    }

    /// Whether any path was modified, the condition that triggers alerting.
    pub fn has_modifications(&self) -> bool {
        !self.modified.is_empty()
    }
}

/// Compare two snapshots.
///
/// One linear pass over each snapshot's keys: paths from `previous` missing
/// in `current` are deleted, present with a different fingerprint are
/// modified; paths in `current` missing from `previous` are added. A file
/// replaced at the same path with different content classifies as modified,
/// not as a deleted/added pair.
pub fn diff(previous: &Snapshot, current: &Snapshot) -> ChangeSet {
    let mut changes = ChangeSet::default();

    for (path, fingerprint) in previous.iter() {
        match current.get(path) {
            None => {
                changes.deleted.insert(path.clone());
            }
            Some(current_fingerprint) if current_fingerprint != fingerprint => {
                changes.modified.insert(path.clone());
            }
            Some(_) => {}
        }
    }

    for path in current.paths() {
        if !previous.contains(path) {
            changes.added.insert(path.clone());
        }
    }

    changes
}
