//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.demographics.toml` files.

use crate::cli::OutputFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".demographics.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Dataset settings.
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

/// Where and how to read the census data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Path to the CSV file.
    #[serde(default = "default_data_path")]
    pub path: PathBuf,

    /// Field delimiter.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Trim whitespace around headers and values.
    #[serde(default)]
    pub trim_whitespace: bool,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            delimiter: default_delimiter(),
            trim_whitespace: false,
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("adult.data.csv")
}

fn default_delimiter() -> char {
    ','
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Report format.
    #[serde(default)]
    pub format: OutputFormat,

    /// Write the report to this file instead of stdout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Emit the report at all.
    #[serde(default = "default_true")]
    pub print: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            output: None,
            print: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.demographics.toml` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// Only values given explicitly on the command line override the file.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref data) = args.data {
            self.dataset.path = data.clone();
        }
        if let Some(delimiter) = args.delimiter {
            self.dataset.delimiter = delimiter;
        }
        if args.trim {
            self.dataset.trim_whitespace = true;
        }

        if let Some(format) = args.format {
            self.report.format = format;
        }
        if let Some(ref output) = args.output {
            self.report.output = Some(output.clone());
        }
        if args.no_print {
            self.report.print = false;
        }

        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Log level after combining the config file with the CLI flags.
    ///
    /// `--quiet` always wins; otherwise `verbose = true` in the file enables debug output.
    pub fn log_level(&self, args: &crate::cli::Args) -> tracing::Level {
        if !args.quiet && self.general.verbose {
            tracing::Level::DEBUG
        } else {
            args.log_level()
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::tests::make_args;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.dataset.path, PathBuf::from("adult.data.csv"));
        assert_eq!(config.dataset.delimiter, ',');
        assert!(!config.dataset.trim_whitespace);
        assert_eq!(config.report.format, OutputFormat::Text);
        assert!(config.report.print);
        assert!(config.report.output.is_none());
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
verbose = true

[dataset]
path = "data/census.csv"
delimiter = ";"

[report]
format = "json"
output = "summary.json"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert!(config.general.verbose);
        assert_eq!(config.dataset.path, PathBuf::from("data/census.csv"));
        assert_eq!(config.dataset.delimiter, ';');
        assert!(!config.dataset.trim_whitespace);
        assert_eq!(config.report.format, OutputFormat::Json);
        assert_eq!(config.report.output, Some(PathBuf::from("summary.json")));
        assert!(config.report.print);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[dataset]"));
        assert!(toml_str.contains("[report]"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.dataset.path, PathBuf::from("adult.data.csv"));
        assert_eq!(parsed.report.format, OutputFormat::Text);
    }

    #[test]
    fn test_load_from_dir() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load_from_dir(dir.path()).unwrap().is_none());

        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[dataset]\ntrim_whitespace = true\n",
        )
        .unwrap();
        let config = Config::load_from_dir(dir.path()).unwrap().unwrap();
        assert!(config.dataset.trim_whitespace);

        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[dataset\n").unwrap();
        assert!(Config::load_from_dir(dir.path()).is_err());
    }

    #[test]
    fn test_merge_with_args() {
        let mut config = Config::default();
        config.dataset.path = PathBuf::from("from_file.csv");
        config.report.format = OutputFormat::Markdown;

        let mut args = make_args();
        config.merge_with_args(&args);
        assert_eq!(config.dataset.path, PathBuf::from("from_file.csv"));
        assert_eq!(config.report.format, OutputFormat::Markdown);

        args.data = Some(PathBuf::from("from_cli.csv"));
        args.format = Some(OutputFormat::Json);
        args.delimiter = Some('\t');
        args.no_print = true;
        config.merge_with_args(&args);
        assert_eq!(config.dataset.path, PathBuf::from("from_cli.csv"));
        assert_eq!(config.report.format, OutputFormat::Json);
        assert_eq!(config.dataset.delimiter, '\t');
        assert!(!config.report.print);
    }

    #[test]
    fn test_log_level_honors_config_verbose() {
        let mut config = Config::default();
        let mut args = make_args();
        assert_eq!(config.log_level(&args), tracing::Level::INFO);

        config.general.verbose = true;
        assert_eq!(config.log_level(&args), tracing::Level::DEBUG);

        args.quiet = true;
        assert_eq!(config.log_level(&args), tracing::Level::ERROR);
    }
}
