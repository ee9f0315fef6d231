//! Unified error handling for the client.
//!
//! Resource services return [`ClientError`] unchanged; hooks turn it into a
//! stored message. The variants follow the failure taxonomy callers need to
//! tell apart: no response at all, an HTTP error status, or a response that
//! did not have the expected shape.

use reqwest::StatusCode;
use shopfront_core::{EmailError, IdError};
use thiserror::Error;

/// Maximum number of body characters kept in an error message.
pub(crate) const ERROR_BODY_LIMIT: usize = 200;

/// Errors that can occur when calling the storefront backend.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No response: network unreachable, DNS failure, timeout.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with a 4xx/5xx status.
    #[error("HTTP {status}: {message}")]
    Status { status: StatusCode, message: String },

    /// Backend answered 2xx but flagged the envelope as unsuccessful.
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// Response body did not match the expected shape.
    #[error("Unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// A required identifier was empty.
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(#[from] IdError),

    /// An email address failed validation before sending.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The HTTP transport could not be built.
    #[error("Client setup failed: {0}")]
    Setup(String),

    /// The request was superseded or its caller went away.
    #[error("Request cancelled")]
    Cancelled,
}

impl ClientError {
    /// HTTP status of the failure, if the backend answered.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(err) => err.status(),
            _ => None,
        }
    }

    /// Whether the backend rejected the credentials (or their absence).
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    /// Build a status error from a response body.
    ///
    /// Uses the body's `message` or `error` field when it is JSON, otherwise
    /// the raw text, truncated.
    pub(crate) fn from_status(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                ["message", "error"]
                    .iter()
                    .find_map(|key| value.get(key).and_then(|v| v.as_str()).map(String::from))
            })
            .unwrap_or_else(|| body.chars().take(ERROR_BODY_LIMIT).collect());

        let message = if message.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        } else {
            message
        };

        Self::Status { status, message }
    }
}

/// Result type alias for `ClientError`.
pub type Result<T> = std::result::Result<T, ClientError>;
