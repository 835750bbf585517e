//! Logging System
//!
//! Structured logging via the `tracing` crate: configurable level, text or
//! JSON format, and stdout/stderr/file destinations. Initialized once at
//! startup; `VIGIL_LOG` overrides the configured filter.

use crate::error::MonitorError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: text or json
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, stderr, or file
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path (required when output = "file")
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Enable colored output (text format, terminal destinations only)
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_true(),
        }
    }
}

/// Initialize the logging system.
///
/// Filter precedence: `VIGIL_LOG` environment variable, then the configured
/// level. Format and output come from the config (`VIGIL_LOG_FORMAT` and
/// `VIGIL_LOG_OUTPUT` override them).
pub fn init_logging(config: &LoggingConfig) -> Result<(), MonitorError> {
    let filter = build_env_filter(config);
    let format = determine(&config.format, "VIGIL_LOG_FORMAT", &["text", "json"])?;
    let output = determine(&config.output, "VIGIL_LOG_OUTPUT", &["stdout", "stderr", "file"])?;

    let base = Registry::default().with(filter);

    macro_rules! init_with_writer {
        ($writer:expr, $ansi:expr) => {
            if format == "json" {
                base.with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_writer($writer),
                )
                .init();
            } else {
                base.with(
                    fmt::layer()
                        .with_target(true)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_ansi($ansi)
                        .with_writer($writer),
                )
                .init();
            }
        };
    }

    match output.as_str() {
        "file" => {
            let path = config.file.clone().ok_or_else(|| {
                MonitorError::Config("log output is 'file' but no log file is set".to_string())
            })?;
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        MonitorError::Config(format!("failed to create log directory: {}", e))
                    })?;
                }
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| {
                    MonitorError::Config(format!("failed to open log file {:?}: {}", path, e))
                })?;
            init_with_writer!(file, false);
        }
        "stdout" => init_with_writer!(std::io::stdout, config.color),
        _ => init_with_writer!(std::io::stderr, config.color),
    }

    Ok(())
}

fn build_env_filter(config: &LoggingConfig) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_env("VIGIL_LOG") {
        return filter;
    }
    EnvFilter::new(&config.level)
}

/// Resolve a setting from its env override or config value, checking it is
/// one of the allowed values.
fn determine(configured: &str, env_var: &str, allowed: &[&str]) -> Result<String, MonitorError> {
    let value = std::env::var(env_var).unwrap_or_else(|_| configured.to_string());
    if allowed.contains(&value.as_str()) {
        Ok(value)
    } else {
        Err(MonitorError::Config(format!(
            "invalid log setting '{}' (must be one of {:?})",
            value, allowed
        )))
    }
}
