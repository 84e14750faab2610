//! API error types.

use thiserror::Error;

/// Errors that can occur when talking to the task service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport error (connection, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request did not complete within the configured timeout.
    #[error("request timed out after {timeout_secs}s: {request}")]
    Timeout {
        /// Method and path of the request.
        request: String,
        timeout_secs: u64,
    },

    /// The service returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the service.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// Failed to parse a service response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The service returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The sync request succeeded but the service rejected some commands.
    #[error("{failed} of {total} commands failed")]
    CommandFailed { failed: usize, total: usize },
}

impl ApiError {
    /// Whether a retry of the same request may succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::RateLimited { .. } => true,
            Self::Http(error) => error.is_connect() || error.is_timeout(),
            Self::Api { status, .. } => *status >= 500,
            Self::Parse(_) | Self::CommandFailed { .. } => false,
        }
    }
}
