//! Error types for Liftoff

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using LiftoffError
pub type Result<T> = std::result::Result<T, LiftoffError>;

/// Result type for source-hosting operations
pub type HostingResult<T> = std::result::Result<T, HostingError>;

/// Main error type for Liftoff operations
#[derive(Debug, Error)]
pub enum LiftoffError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Workflow input errors
    #[error(transparent)]
    Input(#[from] InputError),

    /// Source-hosting API errors
    #[error(transparent)]
    Hosting(#[from] HostingError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors in the key/value inputs handed over by the workflow
#[derive(Debug, Error)]
pub enum InputError {
    /// A required variable was not set or was empty
    #[error("Missing required workflow variable: {0}")]
    Missing(String),

    /// A variable was set but could not be interpreted
    #[error("Invalid workflow variable {key}: {message}")]
    Invalid { key: String, message: String },
}

/// Errors reported by a source-hosting backend
#[derive(Debug, Error)]
pub enum HostingError {
    /// The API answered with a non-success status
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Authentication was rejected
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// The requested object does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The request never produced a response
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body could not be decoded
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl LiftoffError {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }
}

impl InputError {
    /// Shorthand for an invalid-value error
    pub fn invalid(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            key: key.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hosting_error_is_transparent() {
        let err: LiftoffError = HostingError::Api {
            status: 422,
            message: "Validation Failed".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "API error: 422 - Validation Failed");
    }

    #[test]
    fn test_input_error_message() {
        let err = InputError::invalid("GITHUB_REPOSITORY", "expected owner/name");
        assert_eq!(
            err.to_string(),
            "Invalid workflow variable GITHUB_REPOSITORY: expected owner/name"
        );
    }
}
