//! Filesystem walker for enumerating regular files under a monitored root

use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

/// Filesystem walker configuration
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Whether to follow symbolic links (default: false)
    pub follow_symlinks: bool,
    /// Path components to ignore (e.g. ".git", "target")
    pub ignore_patterns: Vec<String>,
    /// Exact paths to exclude (e.g. the snapshot store file when it lives
    /// inside the monitored root)
    pub exclude_paths: Vec<PathBuf>,
}

/// Filesystem walker
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            config: WalkerConfig::default(),
        }
    }

    /// Create a walker with custom configuration
    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Self {
        Self { root, config }
    }

    /// Walk the tree and collect the paths of all regular files.
    ///
    /// Directories are traversed but not recorded. Entries that error during
    /// traversal (vanished mid-walk, permission denied) are logged and
    /// skipped; the walk continues. Order is unspecified.
    pub fn walk(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        let walker = WalkDir::new(&self.root).follow_links(self.config.follow_symlinks);

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable entry during walk");
                    continue;
                }
            };

            if self.should_ignore(&entry) {
                continue;
            }

            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }

        files
    }

    /// Check if an entry should be ignored
    fn should_ignore(&self, entry: &DirEntry) -> bool {
        let path = entry.path();

        if self.config.exclude_paths.iter().any(|p| p.as_path() == path) {
            return true;
        }

        for pattern in &self.config.ignore_patterns {
            if Self::component_matches(path, pattern) {
                return true;
            }
        }

        false
    }

    fn component_matches(path: &Path, pattern: &str) -> bool {
        path.components().any(|component| {
            matches!(component, std::path::Component::Normal(name) if name.to_string_lossy() == pattern)
        })
    }
}
