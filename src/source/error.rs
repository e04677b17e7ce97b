//! Error types for dashboard data sources.

use thiserror::Error;

use super::Dataset;

/// Errors that can occur when fetching a dataset.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The endpoint answered with a non-success status.
    #[error("{dataset} endpoint returned status {status}")]
    Status { dataset: Dataset, status: u16 },

    /// Connection failed.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Timeout waiting for response.
    #[error("Request timed out")]
    Timeout,

    /// The payload was not valid JSON or had the wrong top-level shape.
    #[error("Failed to parse {dataset}: {message}")]
    Parse { dataset: Dataset, message: String },

    /// Reading a local dataset failed.
    #[error("Read error: {0}")]
    Io(String),
}

impl FetchError {
    pub(crate) fn parse(dataset: Dataset, message: impl Into<String>) -> Self {
        FetchError::Parse {
            dataset,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::Connection(err.to_string())
        } else {
            FetchError::Http(err.to_string())
        }
    }
}

impl From<std::io::Error> for FetchError {
    fn from(err: std::io::Error) -> Self {
        FetchError::Io(err.to_string())
    }
}
