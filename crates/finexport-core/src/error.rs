//! Error types for finexport

use thiserror::Error;

/// Main error type for finexport
#[derive(Debug, Error)]
pub enum FinExportError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No exporter registered under the requested name
    #[error("Unknown export format: {0}")]
    UnknownFormat(String),

    /// Nothing to export
    #[error("No records to export")]
    EmptyInput,

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<FinExportError>,
    },
}

impl FinExportError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        FinExportError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Whether this error (or the error it wraps) is the empty-input decline
    pub fn is_empty_input(&self) -> bool {
        match self {
            FinExportError::EmptyInput => true,
            FinExportError::WithContext { source, .. } => source.is_empty_input(),
            _ => false,
        }
    }
}

impl From<toml::de::Error> for FinExportError {
    fn from(err: toml::de::Error) -> Self {
        FinExportError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for FinExportError {
    fn from(err: toml::ser::Error) -> Self {
        FinExportError::Toml(err.to_string())
    }
}

/// Result type alias for finexport
pub type Result<T> = std::result::Result<T, FinExportError>;
