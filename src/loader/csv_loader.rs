//! CSV dataset reader.
//!
//! Rows are deserialized straight into [`Record`] with the csv crate.
//! Columns outside the record schema are ignored; values are not cleaned.

use crate::config::DatasetConfig;
use crate::models::{Dataset, Record, REQUIRED_COLUMNS};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors raised while loading a dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to open dataset {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read header row: {source}")]
    Header { source: csv::Error },

    #[error("Dataset is missing required column '{column}'")]
    MissingColumn { column: &'static str },

    #[error("Invalid record on line {line}: {source}")]
    Row { line: u64, source: csv::Error },

    #[error("Delimiter must be a single ASCII character, got {0:?}")]
    InvalidDelimiter(char),
}

/// Options controlling how the CSV is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Trim surrounding whitespace from headers and fields.
    pub trim_whitespace: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim_whitespace: false,
        }
    }
}

impl TryFrom<&DatasetConfig> for LoadOptions {
    type Error = LoadError;

    fn try_from(config: &DatasetConfig) -> Result<Self, Self::Error> {
        let delimiter = u8::try_from(config.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or(LoadError::InvalidDelimiter(config.delimiter))?;

        Ok(Self {
            delimiter,
            trim_whitespace: config.trim_whitespace,
        })
    }
}

/// Load a dataset from a CSV file on disk.
pub fn load_dataset(path: &Path, options: &LoadOptions) -> Result<Dataset, LoadError> {
    info!("Loading dataset from: {}", path.display());

    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let dataset = read_dataset(file, options)?;
    if dataset.is_empty() {
        warn!("Dataset {} has a header but no records", path.display());
    } else {
        info!("Loaded {} records", dataset.len());
    }

    Ok(dataset)
}

/// Read a dataset from any CSV source whose first line is the header.
pub fn read_dataset<R: Read>(reader: R, options: &LoadOptions) -> Result<Dataset, LoadError> {
    let trim = if options.trim_whitespace {
        csv::Trim::All
    } else {
        csv::Trim::None
    };

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .trim(trim)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|source| LoadError::Header { source })?;

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn { column });
        }
    }
    debug!("Header has {} columns", headers.len());

    let mut records = Vec::new();
    for result in rdr.deserialize::<Record>() {
        let record = result.map_err(|source| {
            let line = source.position().map(|p| p.line()).unwrap_or(0);
            LoadError::Row { line, source }
        })?;
        records.push(record);
    }

    Ok(Dataset::from(records))
}
