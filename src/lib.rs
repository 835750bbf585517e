//! Vigil: Poll-Based File Integrity Monitoring
//!
//! Periodically scans a directory tree, fingerprints every file's contents,
//! diffs against the previous scan, alerts an operator when files are
//! modified, and persists the new baseline so state survives restarts.

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod logging;
pub mod monitor;
pub mod notifier;
pub mod report;
pub mod snapshot;
pub mod store;
