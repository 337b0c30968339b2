//! Demographic Analyzer - descriptive statistics over census records
//!
//! A CLI tool that loads the adult census dataset and reports a fixed
//! set of demographic statistics as text, Markdown or JSON.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Input error (missing file, bad column, bad row) or a statistic
//!       that could not be computed from the data

mod analysis;
mod cli;
mod config;
mod loader;
mod models;
mod report;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::Args;
use config::{Config, CONFIG_FILE_NAME};
use loader::LoadOptions;
use models::{Report, ReportMetadata};
use std::time::Instant;
use tracing::{debug, error, info};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Configuration decides the log level, so it is loaded before logging starts
    let mut config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    init_logging(config.log_level(&args));

    info!("Demographic Analyzer v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    debug!("Effective config: {:?}", config);

    if let Err(e) = run(&config) {
        error!("Analysis failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .demographics.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "{} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("Created {} with default settings.", CONFIG_FILE_NAME);
    Ok(())
}

/// Initialize logging at the given level.
///
/// Logs go to stderr so a report on stdout stays machine-readable.
fn init_logging(level: tracing::Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Load, aggregate and report.
fn run(config: &Config) -> Result<()> {
    let start_time = Instant::now();

    let options = LoadOptions::try_from(&config.dataset)?;
    let dataset = loader::load_dataset(&config.dataset.path, &options)?;

    let summary = analysis::compute(&dataset)?;
    info!("Computed demographic summary over {} records", dataset.len());

    if !config.report.print {
        debug!("Report output disabled");
        return Ok(());
    }

    let report = Report {
        metadata: ReportMetadata {
            dataset_path: config.dataset.path.display().to_string(),
            record_count: dataset.len(),
            generated_at: Utc::now(),
            duration_seconds: start_time.elapsed().as_secs_f64(),
        },
        summary,
    };

    let output = report::render(&report, config.report.format)?;

    match &config.report.output {
        Some(path) => {
            report::write_report(&output, path)?;
            info!("Report saved to: {}", path.display());
        }
        None => print!("{}", output),
    }

    Ok(())
}

/// Load configuration from file or use defaults.
///
/// Runs before logging is initialized, so failures are returned rather than logged.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        return Config::load(config_path);
    }

    // Try default location
    Ok(Config::load_default()?.unwrap_or_default())
}
