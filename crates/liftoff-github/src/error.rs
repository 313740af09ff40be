//! GitHub client error types

use liftoff_core::HostingError;
use thiserror::Error;

/// GitHub API errors
#[derive(Debug, Error)]
pub enum GitHubError {
    /// API error from GitHub
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for GitHub operations
pub type Result<T> = std::result::Result<T, GitHubError>;

impl From<GitHubError> for HostingError {
    fn from(err: GitHubError) -> Self {
        match err {
            GitHubError::ApiError { status: 401 | 403, message } => {
                HostingError::Unauthorized(message)
            }
            GitHubError::ApiError {
                status: 404,
                message,
            } => HostingError::NotFound(message),
            GitHubError::ApiError { status, message } => HostingError::Api { status, message },
            GitHubError::Http(e) if e.is_decode() => HostingError::Decode(e.to_string()),
            GitHubError::Http(e) => HostingError::Transport(e.to_string()),
            GitHubError::Json(e) => HostingError::Decode(e.to_string()),
        }
    }
}
