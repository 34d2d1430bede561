//! Configuration management for finexport

use crate::error::{FinExportError, Result};
use crate::types::ExportFormat;
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default markup report title
pub const DEFAULT_REPORT_TITLE: &str = "Data Export";

/// Default long-form timestamp layout for the markup report
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%B %-d, %Y at %-I:%M:%S %p";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Export settings
    pub export: ExportConfig,
    /// Output settings
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            FinExportError::Io(e).with_context(format!("Failed to read {}", path.display()))
        })?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No config at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Serialize to pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        if self.export.timestamp_format.trim().is_empty() {
            return Err(FinExportError::Config(
                "export.timestamp_format must not be empty".to_string(),
            ));
        }
        if StrftimeItems::new(&self.export.timestamp_format)
            .any(|item| matches!(item, Item::Error))
        {
            return Err(FinExportError::Config(format!(
                "export.timestamp_format is not a valid strftime layout: {:?}",
                self.export.timestamp_format
            )));
        }
        Ok(())
    }
}

/// Export-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Format used when none is given on the command line
    pub default_format: ExportFormat,
    /// Heading of the markup report
    pub report_title: String,
    /// strftime layout of the "generated" line in the markup report
    pub timestamp_format: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_format: ExportFormat::Csv,
            report_title: DEFAULT_REPORT_TITLE.to_string(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

/// Output-related configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory exported files are saved to (download directory if unset)
    pub directory: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.export.default_format, ExportFormat::Csv);
        assert_eq!(config.export.report_title, "Data Export");
        assert!(config.output.directory.is_none());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[export]"));
        assert!(toml.contains("default_format = \"csv\""));

        let config2: Config = toml::from_str(&toml).unwrap();
        assert_eq!(config.export.report_title, config2.export.report_title);
        assert_eq!(config.export.timestamp_format, config2.export.timestamp_format);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [export]
            default_format = "html"
            "#,
        )
        .unwrap();
        assert_eq!(config.export.default_format, ExportFormat::Html);
        assert_eq!(config.export.report_title, DEFAULT_REPORT_TITLE);
    }

    #[test]
    fn test_unknown_format_rejected() {
        let result: std::result::Result<Config, _> = toml::from_str(
            r#"
            [export]
            default_format = "pdf"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_empty_timestamp_format() {
        let mut config = Config::default();
        config.export.timestamp_format = "  ".to_string();
        assert!(matches!(config.validate(), Err(FinExportError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_unknown_specifier() {
        let config: Config = toml::from_str("[export]\ntimestamp_format = \"%Q\"\n").unwrap();
        assert!(matches!(config.validate(), Err(FinExportError::Config(_))));
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = Config::load_or_default(Path::new("/nonexistent/finexport.toml")).unwrap();
        assert_eq!(config.export.default_format, ExportFormat::Csv);
    }
}
