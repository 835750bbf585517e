//! CLI parse: clap types for Vigil. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Vigil CLI - Poll-based file integrity monitoring
#[derive(Parser)]
#[command(name = "vigil")]
#[command(about = "Poll-based file integrity monitoring using content fingerprints")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory tree to monitor (overrides config)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Snapshot store path (overrides config)
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Seconds between scan cycles (overrides config)
    #[arg(long)]
    pub interval: Option<u64>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the monitoring loop until interrupted
    Run,
    /// Run a single scan cycle and print the change report
    ///
    /// The cycle persists the new snapshot but never invokes the external
    /// notifier; alerts for a one-shot scan go to the log only.
    Scan {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}
