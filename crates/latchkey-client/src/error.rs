//! Client errors
//!
//! Error types for Latchkey client operations, mapped from HTTP responses.

use thiserror::Error;

/// Error code for a command that took effect but could not be saved
pub const PERSISTENCE_ERROR: &str = "PERSISTENCE_ERROR";

/// Client errors for Latchkey operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure (connect, timeout, TLS) or undecodable body.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with an error envelope.
    #[error("{code} ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error code from the response body, e.g. `INVALID_CREDENTIALS`
        code: String,
        /// Human-readable message
        message: String,
    },

    /// Privileged call attempted without administrator credentials.
    #[error("administrator credentials not configured")]
    MissingCredentials,

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl ClientError {
    /// Returns true if this error is retryable.
    ///
    /// `PERSISTENCE_ERROR` is not: the service already applied the command in
    /// memory, so repeating it would open another session or mint another code.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, code, .. } => *status >= 500 && code != PERSISTENCE_ERROR,
            Self::MissingCredentials | Self::Config(_) => false,
        }
    }

    /// Error code returned by the service, if any.
    #[must_use]
    pub fn api_code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => Some(code),
            _ => None,
        }
    }

    /// HTTP status returned by the service, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
