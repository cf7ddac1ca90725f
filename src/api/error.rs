//! Errors raised at the HTTP boundary.

use thiserror::Error;

/// Errors that can occur when calling the remote API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured base URL cannot be parsed.
    #[error("invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// Base URL as configured.
        url: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// An endpoint path could not be joined onto the base URL.
    #[error("invalid API endpoint '{path}': {reason}")]
    InvalidEndpoint {
        /// Relative endpoint path.
        path: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// The API refused the session (401 or 403).
    #[error("request not authorized ({status})")]
    Unauthorized {
        /// HTTP status code returned by the API.
        status: u16,
    },

    /// The addressed record does not exist (404).
    #[error("not found: {message}")]
    NotFound {
        /// Error message or response body.
        message: String,
    },

    /// The API rejected the request on business grounds (other 4xx).
    #[error("request rejected ({status}): {message}")]
    Rejected {
        /// HTTP status code returned by the API.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The API failed temporarily (5xx, 408 or 429).
    #[error("API unavailable ({status}): {message}")]
    Unavailable {
        /// HTTP status code returned by the API.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body could not be decoded.
    #[error("response decode error: {0}")]
    Decode(String),
}

impl ApiError {
    /// Returns `true` for failures a manual retry may resolve.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable { .. } | Self::Transport(_))
    }
}
