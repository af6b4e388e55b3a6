//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `wayback_index` library that handles:
//! - Command-line argument parsing and validation
//! - Logger initialization
//! - User-facing summary output and exit codes
//!
//! All core functionality is implemented in the library crate.

use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use wayback_index::initialization::init_logger_with;
use wayback_index::{run_query, Config, Opt};

#[tokio::main]
async fn main() -> Result<()> {
    let opt = Opt::parse();

    // Validate CLI options into an immutable Config; input errors abort
    // before any network activity
    let config = match Config::try_from(opt) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("wayback_index error: {:#}", e);
            process::exit(1);
        }
    };

    // Verbose mode bumps the log level so per-line diagnostics show up
    let log_level = if config.verbose {
        log::LevelFilter::Debug
    } else {
        config.log_level.clone().into()
    };
    init_logger_with(log_level, config.log_format.clone()).context("Failed to initialize logger")?;

    let verbose = config.verbose;
    match run_query(config).await {
        Ok(report) => {
            if verbose {
                eprintln!(
                    "Processed {} domain{} ({} failed), {} record{} in {:.1}s",
                    report.domains_attempted,
                    if report.domains_attempted == 1 { "" } else { "s" },
                    report.domains_failed,
                    report.records_emitted,
                    if report.records_emitted == 1 { "" } else { "s" },
                    report.elapsed_seconds
                );
            }
            // Every domain failing is a failed run even when iteration
            // continued to the end
            if report.domains_attempted > 0 && report.domains_failed == report.domains_attempted {
                process::exit(1);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("wayback_index error: {:#}", e);
            process::exit(1);
        }
    }
}
