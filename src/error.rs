use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LegendError>;

#[derive(Error, Debug)]
pub enum LegendError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parquet write error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid text encoding: '{0}'")]
    InvalidEncoding(String),

    #[error("Year {year} has no municipal coalition data (known years: {known})")]
    UnsupportedYear { year: u16, known: String },

    #[error("Invalid federation unit: '{0}'")]
    InvalidFederationUnit(String),

    #[error("Download of {url} failed: {message}")]
    Download { url: String, message: String },

    #[error("Archive extraction failed: {0}")]
    Extraction(String),

    #[error("No source file for federation unit {uf} in {}", .directory.display())]
    MissingFederationUnitFile { uf: String, directory: PathBuf },

    #[error("{}: row {row} has {found} columns, expected {expected}", .file.display())]
    SchemaMismatch {
        file: PathBuf,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("{}: row {row} belongs to federation unit '{found}', expected {expected}", .file.display())]
    UnexpectedFederationUnit {
        file: PathBuf,
        row: usize,
        expected: String,
        found: String,
    },

    #[error("Export to {} failed: {message}", .path.display())]
    Export { path: PathBuf, message: String },
}

impl LegendError {
    pub(crate) fn download(url: &str, err: impl std::fmt::Display) -> Self {
        LegendError::Download {
            url: url.to_string(),
            message: err.to_string(),
        }
    }

    pub(crate) fn export(path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        LegendError::Export {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}
