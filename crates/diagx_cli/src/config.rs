use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use diagx_engine::{resolve_encodings, ExtractSettings};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::args::Args;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse RON: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Settings file for the `diagx` binary. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub encodings: Vec<String>,
    pub max_rows_per_table: usize,
    pub staging_dir: Option<PathBuf>,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        let extract = ExtractSettings::default();
        Self {
            encodings: extract.encodings,
            max_rows_per_table: extract.max_rows_per_table,
            staging_dir: extract.staging_dir,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl CliConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(content)?)
    }

    /// Command-line flags win over the file.
    pub fn with_overrides(mut self, args: &Args) -> Self {
        if !args.encodings.is_empty() {
            self.encodings = args.encodings.clone();
        }
        if let Some(max_rows) = args.max_rows {
            self.max_rows_per_table = max_rows;
        }
        if let Some(level) = &args.log_level {
            self.log_level = level.clone();
        }
        if let Some(file) = &args.log_file {
            self.log_file = Some(file.clone());
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_rows_per_table == 0 {
            return Err(ConfigError::Invalid(
                "max_rows_per_table must be at least 1".into(),
            ));
        }
        resolve_encodings(self.encodings.as_slice())
            .map_err(|err| ConfigError::Invalid(err.to_string()))?;
        if diagx_logging::parse_level(&self.log_level).is_none() {
            return Err(ConfigError::Invalid(format!(
                "unknown log level {:?}",
                self.log_level
            )));
        }
        Ok(())
    }

    pub fn log_level_filter(&self) -> LevelFilter {
        diagx_logging::parse_level(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    pub fn extract_settings(&self) -> ExtractSettings {
        ExtractSettings {
            encodings: self.encodings.clone(),
            max_rows_per_table: self.max_rows_per_table,
            staging_dir: self.staging_dir.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = CliConfig::parse("(max_rows_per_table: 500, log_level: \"debug\")").unwrap();
        assert_eq!(config.max_rows_per_table, 500);
        assert_eq!(config.log_level_filter(), LevelFilter::Debug);
        assert_eq!(config.encodings, CliConfig::default().encodings);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        assert!(matches!(
            CliConfig::parse("(max_rows_per_table: \"lots\")"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn validation_rejects_bad_values() {
        let zero = CliConfig {
            max_rows_per_table: 0,
            ..CliConfig::default()
        };
        assert!(matches!(zero.validate(), Err(ConfigError::Invalid(_))));

        let no_encodings = CliConfig {
            encodings: Vec::new(),
            ..CliConfig::default()
        };
        assert!(matches!(no_encodings.validate(), Err(ConfigError::Invalid(_))));

        let bad_label = CliConfig {
            encodings: vec!["utf-8".into(), "rot13".into()],
            ..CliConfig::default()
        };
        assert!(matches!(bad_label.validate(), Err(ConfigError::Invalid(_))));

        let bad_level = CliConfig {
            log_level: "chatty".into(),
            ..CliConfig::default()
        };
        assert!(matches!(bad_level.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn flags_override_file_values() {
        let args = Args {
            encodings: vec!["windows-1252".into()],
            max_rows: Some(10),
            log_level: Some("warn".into()),
            ..Args::default()
        };
        let config = CliConfig::default().with_overrides(&args);
        assert_eq!(config.encodings, vec!["windows-1252".to_string()]);
        assert_eq!(config.max_rows_per_table, 10);
        assert_eq!(config.log_level_filter(), LevelFilter::Warn);
        assert_eq!(config.extract_settings().max_rows_per_table, 10);
    }

    #[test]
    fn config_loads_from_disk() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("diagx.ron");
        fs::write(&path, "(encodings: [\"utf-8\"], log_file: Some(\"diagx.log\"))").unwrap();
        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.encodings, vec!["utf-8".to_string()]);
        assert_eq!(config.log_file, Some(PathBuf::from("diagx.log")));
    }
}
