//! Configuration System
//!
//! Immutable monitor configuration loaded from an optional TOML file with
//! `VIGIL_*` environment overrides. The resulting value is passed into
//! `Monitor::new`; there is no process-wide mutable configuration state, so
//! several independent monitors can coexist in one process.

use crate::error::MonitorError;
use crate::logging::LoggingConfig;
use crate::notifier::NotifierConfig;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file looked up in the working directory when no explicit
/// path is given.
const DEFAULT_CONFIG_FILE: &str = "vigil.toml";

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Directory tree to monitor
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Path of the persisted snapshot store
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// Seconds between scan cycles (positive)
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Path components excluded from scanning (e.g. ".git")
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    /// Whether the walk follows symbolic links
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Alert delivery configuration
    #[serde(default)]
    pub notifier: NotifierConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_store_path() -> PathBuf {
    PathBuf::from(".vigil/snapshot.json")
}

fn default_interval_secs() -> u64 {
    10
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            store_path: default_store_path(),
            interval_secs: default_interval_secs(),
            ignore_patterns: Vec::new(),
            follow_symlinks: false,
            notifier: NotifierConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl MonitorConfig {
    /// Load configuration.
    ///
    /// Sources, lowest to highest precedence: field defaults, the explicit
    /// config file (or `vigil.toml` in the working directory when present),
    /// then `VIGIL_*` environment variables (`VIGIL_INTERVAL_SECS=30`,
    /// `VIGIL_NOTIFIER__URL=...`).
    pub fn load(explicit_file: Option<&Path>) -> Result<Self, MonitorError> {
        let mut builder = Config::builder();

        match explicit_file {
            Some(path) => {
                builder = builder.add_source(File::from(path));
            }
            None => {
                let default_file = Path::new(DEFAULT_CONFIG_FILE);
                if default_file.exists() {
                    builder = builder.add_source(File::from(default_file));
                }
            }
        }

        builder = builder.add_source(Environment::with_prefix("VIGIL").separator("__"));

        let config: MonitorConfig = builder.build()?.try_deserialize()?;
        config.validate().map_err(MonitorError::Config)?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.interval_secs == 0 {
            return Err("interval_secs must be a positive number of seconds".to_string());
        }
        if self.root.as_os_str().is_empty() {
            return Err("root cannot be empty".to_string());
        }
        if self.store_path.as_os_str().is_empty() {
            return Err("store_path cannot be empty".to_string());
        }
        self.notifier
            .validate()
            .map_err(|e| format!("notifier: {}", e))?;
        Ok(())
    }
}
