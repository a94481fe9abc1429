//! Error types for the folder monitor
//!
//! Setup failures (bad paths, bad URLs) are typed here so callers can react
//! to them; the CLI layer wraps them in `anyhow` for reporting.

use std::path::PathBuf;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("The specified path does not exist: {}", .path.display())]
    PathNotFound { path: PathBuf },

    #[error("Invalid ntfy server URL: {url}")]
    InvalidServerUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Failed to create HTTP client")]
    HttpClient {
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to send notification: {status}")]
    NotificationFailed { status: u16 },

    #[error("Error sending notification: {source}")]
    Request {
        #[source]
        source: reqwest::Error,
    },

    #[error("Watch error: {source}")]
    Watch {
        #[source]
        source: notify::Error,
    },
}

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a new PathNotFound error
    pub fn path_not_found(path: impl Into<PathBuf>) -> Self {
        Self::PathNotFound { path: path.into() }
    }

    /// Create a new InvalidServerUrl error
    pub fn invalid_server_url(url: impl Into<String>, source: url::ParseError) -> Self {
        Self::InvalidServerUrl {
            url: url.into(),
            source,
        }
    }

    /// Create a new NotificationFailed error from a response status
    pub fn notification_failed(status: reqwest::StatusCode) -> Self {
        Self::NotificationFailed {
            status: status.as_u16(),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request { source: err }
    }
}

impl From<notify::Error> for AppError {
    fn from(err: notify::Error) -> Self {
        Self::Watch { source: err }
    }
}
