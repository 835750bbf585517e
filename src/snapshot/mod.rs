//! Filesystem Snapshots
//!
//! A snapshot is the complete path-to-fingerprint mapping for one monitored
//! tree at one instant. Snapshots are built fresh every cycle and compared
//! pairwise; they are never mutated incrementally.

pub mod builder;
pub mod hasher;
pub mod walker;

pub use builder::SnapshotBuilder;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Content fingerprint: a 256-bit BLAKE3 digest, hex-encoded as 64 lowercase
/// characters.
///
/// Used as a proxy for "unchanged since last observation", not as a
/// cryptographic integrity proof.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<blake3::Hash> for Fingerprint {
    fn from(hash: blake3::Hash) -> Self {
        Fingerprint(hex::encode(hash.as_bytes()))
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Complete mapping from file path to content fingerprint.
///
/// Keys are the canonical absolute path strings produced by the walk; equality
/// is exact string identity. Every key corresponds to a file that existed and
/// was readable at capture time; unreadable files are simply absent.
///
/// The map is ordered for stable serialization, but callers must not rely on
/// traversal or iteration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    entries: BTreeMap<String, Fingerprint>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: String, fingerprint: Fingerprint) {
        self.entries.insert(path, fingerprint);
    }

    pub fn get(&self, path: &str) -> Option<&Fingerprint> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Fingerprint)> {
        self.entries.iter()
    }

    /// All paths in the snapshot
    pub fn paths(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }
}

impl FromIterator<(String, Fingerprint)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (String, Fingerprint)>>(iter: I) -> Self {
        Snapshot {
            entries: iter.into_iter().collect(),
        }
    }
}
