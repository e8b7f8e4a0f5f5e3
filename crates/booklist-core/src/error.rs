//! Core error types for booklist-core.
//!
//! The reading-list operations themselves never fail: a missing book is a
//! `false` and an empty list is a `None`. The types here cover the layers
//! around the model (configuration, seed import, collaborator-side
//! validation).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for booklist-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Seed import errors
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not exist in the configuration tree
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Configuration directory could not be created
    #[error("Failed to prepare config directory {path}: {source}")]
    DirUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Seed file import errors.
#[derive(Error, Debug)]
pub enum ImportError {
    /// Seed file could not be read
    #[error("Failed to read seed file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Extension is neither `.toml` nor `.json`
    #[error("Unsupported seed file format: {path} (expected .toml or .json)")]
    UnsupportedFormat { path: PathBuf },

    /// Document could not be parsed
    #[error("Failed to parse {format} seed: {message}")]
    ParseFailed {
        format: &'static str,
        message: String,
    },

    /// A single entry carries a bad value
    #[error("Invalid seed entry #{index}: {source}")]
    InvalidEntry {
        index: usize,
        #[source]
        source: ValidationError,
    },
}

/// Validation errors raised by collaborators before handing data to the model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Title is empty or whitespace
    #[error("book title must not be empty")]
    EmptyTitle,

    /// Date could not be parsed
    #[error("Invalid date '{value}': expected YYYY-MM-DD or RFC 3339")]
    InvalidDate { value: String },

    /// Book id is not a non-negative integer
    #[error("Invalid book id '{value}'")]
    InvalidId { value: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_converts_into_core_error() {
        let err: CoreError = ValidationError::EmptyTitle.into();
        assert_eq!(
            err.to_string(),
            "Validation error: book title must not be empty"
        );
    }

    #[test]
    fn unknown_key_keeps_config_prefix() {
        let err: CoreError = ConfigError::UnknownKey("display.nope".into()).into();
        assert_eq!(
            err.to_string(),
            "Configuration error: unknown config key: display.nope"
        );
    }

    #[test]
    fn invalid_entry_reports_index() {
        let err = ImportError::InvalidEntry {
            index: 2,
            source: ValidationError::InvalidDate {
                value: "yesterday".into(),
            },
        };
        assert!(err.to_string().contains("#2"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
