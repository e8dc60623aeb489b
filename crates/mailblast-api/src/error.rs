//! Error types for the API client.

use thiserror::Error;

/// Errors that can occur while talking to the backend.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport or decoding failure (connection refused, non-2xx status,
    /// malformed JSON).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint path could not be joined onto the base URL.
    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    /// The backend answered with `success: false`; the message is its
    /// `error` field, passed through without interpretation.
    #[error("Backend error: {0}")]
    Backend(String),
}

impl Error {
    /// Builds a [`Error::Backend`] from an optional wire `error` field.
    pub(crate) fn backend(message: Option<String>) -> Self {
        Self::Backend(message.unwrap_or_else(|| "unspecified backend error".to_owned()))
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
