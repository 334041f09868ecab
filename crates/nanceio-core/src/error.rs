//! Error types for the nance.io core library.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error types.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration loading or parsing error.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Page bundle failed validation.
    #[error("Bundle error in {path}: {message}")]
    Bundle { path: PathBuf, message: String },

    /// File system I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Generic configuration crate error.
    #[error("Config crate error: {0}")]
    ConfigCrate(#[from] config::ConfigError),
}

/// Reasons a slug is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlugError {
    /// Nothing left after trimming slashes.
    #[error("slug cannot be empty")]
    Empty,

    /// A `//` inside the slug.
    #[error("slug contains an empty segment")]
    EmptySegment,

    /// A `.` or `..` segment.
    #[error("slug contains a relative segment '{0}'")]
    RelativeSegment(String),

    /// A character outside the unreserved URL path set.
    #[error("slug contains invalid character {0:?}")]
    InvalidChar(char),
}

impl CoreError {
    /// Create a new configuration error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source.
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new bundle validation error.
    pub fn bundle(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Bundle {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err = CoreError::config("missing field");
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("missing field"));
    }

    #[test]
    fn test_bundle_error() {
        let err = CoreError::bundle("bundles/post.json", "empty title");
        assert!(err.to_string().contains("Bundle error"));
        assert!(err.to_string().contains("bundles/post.json"));
        assert!(err.to_string().contains("empty title"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CoreError = io_err.into();
        assert!(err.to_string().contains("IO error"));
    }
}
