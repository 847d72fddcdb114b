use crate::error::Result;
use crate::utils::constants::{COMPRESSION_SNAPPY, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use crate::writers::parquet_writer::parse_compression;
use validator::{Validate, ValidationError};

const CONFIG_FILE_STEM: &str = "legend-local";
const ENV_PREFIX: &str = "LEGEND_LOCAL";

/// Runtime settings shared by every invocation.
///
/// Sources, lowest precedence first: built-in defaults, an optional
/// `legend-local.toml` (or an explicit file), `LEGEND_LOCAL_*` variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Settings {
    #[validate(url)]
    pub base_url: String,

    #[validate(range(min = 1))]
    pub timeout_secs: u64,

    /// Parent of the scoped download/extraction area.
    pub work_dir: PathBuf,

    /// Where exported files are written.
    pub output_dir: PathBuf,

    #[validate(custom(function = "validate_compression"))]
    pub compression: String,
}

fn validate_compression(value: &str) -> std::result::Result<(), ValidationError> {
    match parse_compression(value) {
        Some(_) => Ok(()),
        None => {
            let mut err = ValidationError::new("compression");
            err.message = Some(format!("unsupported compression '{}'", value).into());
            Err(err)
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            work_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            compression: COMPRESSION_SNAPPY.to_string(),
        }
    }
}

impl Settings {
    pub fn load_from(config_file: Option<&Path>) -> Result<Self> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("base_url", defaults.base_url)?
            .set_default("timeout_secs", defaults.timeout_secs as i64)?
            .set_default("work_dir", defaults.work_dir.to_string_lossy().to_string())?
            .set_default("output_dir", defaults.output_dir.to_string_lossy().to_string())?
            .set_default("compression", defaults.compression)?;

        builder = match config_file {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(CONFIG_FILE_STEM).required(false)),
        };

        let settings: Settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_work_dir(mut self, work_dir: impl Into<PathBuf>) -> Self {
        self.work_dir = work_dir.into();
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let settings = Settings::default().with_timeout_secs(0);
        assert!(settings.validate().is_err());

        let settings = Settings::default().with_base_url("not a url");
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.compression = "bogus".to_string();
        assert!(settings.validate().is_err());
        settings.compression = "ZSTD".to_string();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_load_from_file_overrides_defaults() -> Result<()> {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "base_url = \"http://localhost:8080/legendas\"")?;
        writeln!(file, "timeout_secs = 30")?;
        file.flush()?;

        let settings = Settings::load_from(Some(file.path()))?;
        assert_eq!(settings.base_url, "http://localhost:8080/legendas");
        assert_eq!(settings.timeout_secs, 30);
        assert_eq!(settings.compression, COMPRESSION_SNAPPY);
        Ok(())
    }

    #[test]
    fn test_load_from_file_rejects_invalid() -> Result<()> {
        let mut file: NamedTempFile = tempfile::Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "timeout_secs = 0")?;
        file.flush()?;

        assert!(Settings::load_from(Some(file.path())).is_err());
        Ok(())
    }
}
