//! Error types for the Vigil file integrity monitor.

use std::path::PathBuf;
use thiserror::Error;

/// A file could not be opened or read while fingerprinting.
///
/// This is a per-file condition, not a scan failure: the builder excludes the
/// file from the snapshot and continues.
#[derive(Debug, Error)]
#[error("file {path:?} is not readable: {source}")]
pub struct NotReadable {
    /// Path that failed to open or read
    pub path: PathBuf,
    /// Underlying I/O error
    #[source]
    pub source: std::io::Error,
}

/// Snapshot store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read snapshot store {path:?}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot store {path:?} is malformed: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write snapshot store {path:?}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Alert delivery errors
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("failed to build notifier client: {0}")]
    Client(String),

    #[error("alert delivery failed: {0}")]
    Delivery(String),

    #[error("alert endpoint returned status {0}")]
    Status(u16),
}

/// Monitor-level errors
///
/// Only `RootMissing`, `RootNotDirectory`, and `Config` are fatal, and only at
/// startup. Everything else in steady state is recovered inside the cycle.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("monitored root {0:?} does not exist")]
    RootMissing(PathBuf),

    #[error("monitored root {0:?} is not a directory")]
    RootNotDirectory(PathBuf),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("notification error: {0}")]
    Notify(#[from] NotifyError),
}

impl From<config::ConfigError> for MonitorError {
    fn from(err: config::ConfigError) -> Self {
        MonitorError::Config(err.to_string())
    }
}
