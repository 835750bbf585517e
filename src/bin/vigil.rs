//! Vigil CLI Binary
//!
//! Command-line entry point for the Vigil file integrity monitor.

use clap::Parser;
use std::process;
use tracing::{error, info};
use vigil::cli::{Cli, Commands};
use vigil::config::MonitorConfig;
use vigil::logging::{init_logging, LoggingConfig};
use vigil::monitor::Monitor;
use vigil::notifier::LogNotifier;
use vigil::report::{format_report_text, ChangeReport};

fn main() {
    let cli = Cli::parse();

    let config = match MonitorConfig::load(cli.config.as_deref()) {
        Ok(config) => apply_cli_overrides(config, &cli),
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };

    let logging_config = build_logging_config(config.logging.clone(), &cli);
    if let Err(e) = init_logging(&logging_config) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    match &cli.command {
        Commands::Run => {
            let notifier = match config.notifier.build() {
                Ok(n) => n,
                Err(e) => {
                    error!("Failed to build notifier: {}", e);
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }
            };
            let mut monitor = match Monitor::new(&config, notifier) {
                Ok(m) => m,
                Err(e) => {
                    error!("Startup failed: {}", e);
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }
            };
            monitor.run();
        }
        Commands::Scan { format } => {
            // One-shot scans never alert out-of-band
            let mut monitor = match Monitor::new(&config, Box::new(LogNotifier)) {
                Ok(m) => m,
                Err(e) => {
                    error!("Startup failed: {}", e);
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }
            };
            let report = ChangeReport::from_cycle(&monitor.run_cycle());
            if format == "json" {
                println!("{}", report.to_json());
            } else {
                println!("{}", format_report_text(&report));
            }
            info!("Scan completed");
        }
    }
}

/// Apply CLI flag overrides on top of the loaded configuration.
fn apply_cli_overrides(mut config: MonitorConfig, cli: &Cli) -> MonitorConfig {
    if let Some(ref root) = cli.root {
        config.root = root.clone();
    }
    if let Some(ref store) = cli.store {
        config.store_path = store.clone();
    }
    if let Some(interval) = cli.interval {
        config.interval_secs = interval.max(1);
    }
    config
}

/// Build logging configuration from config file and CLI flags.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(mut config: LoggingConfig, cli: &Cli) -> LoggingConfig {
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
        if cli.log_output.is_none() {
            config.output = "file".to_string();
        }
    }
    config
}
