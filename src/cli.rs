//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Demographic Analyzer - descriptive statistics over census records
///
/// Loads the adult census CSV and reports race counts, average age of men,
/// education and salary ratios, minimum working hours, the highest earning
/// country and the most common high-earning occupation in India.
///
/// Examples:
///   demographic-analyzer
///   demographic-analyzer --data ./adult.data.csv --format json
///   demographic-analyzer --format markdown --output summary.md
///   demographic-analyzer --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Census CSV file to analyze
    ///
    /// Defaults to adult.data.csv, or the path set in .demographics.toml.
    #[arg(short, long, value_name = "FILE", env = "DEMOGRAPHICS_DATA")]
    pub data: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .demographics.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Report format (text, markdown, json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// CSV field delimiter
    #[arg(long, value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// Trim whitespace around CSV headers and values
    #[arg(long)]
    pub trim: bool,

    /// Compute the statistics without emitting a report
    #[arg(long)]
    pub no_print: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .demographics.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One line per statistic (default)
    #[default]
    Text,
    /// Markdown document
    Markdown,
    /// JSON document
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(delimiter) = self.delimiter {
            if !delimiter.is_ascii() {
                return Err(format!(
                    "Delimiter must be a single ASCII character, got {:?}",
                    delimiter
                ));
            }
        }

        if self.no_print && self.output.is_some() {
            return Err("Cannot use --output together with --no-print".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn make_args() -> Args {
        Args {
            data: None,
            config: None,
            output: None,
            format: None,
            delimiter: None,
            trim: false,
            no_print: false,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "demographic-analyzer",
            "--data",
            "census.csv",
            "--format",
            "markdown",
            "--delimiter",
            ";",
            "--trim",
        ])
        .unwrap();

        assert_eq!(args.data, Some(PathBuf::from("census.csv")));
        assert_eq!(args.format, Some(OutputFormat::Markdown));
        assert_eq!(args.delimiter, Some(';'));
        assert!(args.trim);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_rejects_unknown_format() {
        let result = Args::try_parse_from(["demographic-analyzer", "--format", "xml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_delimiter() {
        let mut args = make_args();
        args.delimiter = Some('|');
        assert!(args.validate().is_ok());

        args.delimiter = Some('§');
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_output_without_print() {
        let mut args = make_args();
        args.no_print = true;
        assert!(args.validate().is_ok());

        args.output = Some(PathBuf::from("report.txt"));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_init_config_skips_validation() {
        let mut args = make_args();
        args.init_config = true;
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
