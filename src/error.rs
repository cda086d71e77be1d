//! Error types for the ZeroGate SDK.
//!
//! Every fallible operation returns [`ZeroGateError`]. Server-side failures
//! (HTTP status 400 and above) carry the decoded error envelope in
//! [`ApiError`].

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type for ZeroGate operations.
pub type Result<T> = std::result::Result<T, ZeroGateError>;

/// Boxed error returned by [`Transport`](crate::transport::Transport) implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur when using the ZeroGate SDK.
#[derive(Error, Debug)]
pub enum ZeroGateError {
    /// Invalid credentials or client options.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A request body could not be encoded, or a response body could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A streamed request body failed while it was being read.
    #[error("Body read error: {0}")]
    Body(#[from] std::io::Error),

    /// The outgoing request could not be built.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The transport failed to complete the exchange.
    #[error("Transport error: {0}")]
    Transport(#[source] BoxError),

    /// The call's context was cancelled.
    #[error("Request cancelled")]
    Cancelled,

    /// The call's deadline elapsed before the exchange completed.
    #[error("Request deadline exceeded")]
    DeadlineExceeded,

    /// The server answered with an error envelope.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ZeroGateError {
    /// Returns true if this is a retryable error.
    ///
    /// Cancellation is not considered retryable: the caller asked for it.
    pub fn is_retryable(&self) -> bool {
        match self {
            ZeroGateError::Transport(_) => true,
            ZeroGateError::Api(e) => e.status_code >= 500 || e.status_code == 429,
            _ => false,
        }
    }

    /// Returns true if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            ZeroGateError::Api(ApiError {
                status_code: 401 | 403,
                ..
            })
        )
    }

    /// Returns true if the call was cancelled or ran past its deadline.
    pub fn is_cancellation(&self) -> bool {
        matches!(
            self,
            ZeroGateError::Cancelled | ZeroGateError::DeadlineExceeded
        )
    }

    /// Returns the HTTP status code if available.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ZeroGateError::Api(e) => Some(e.status_code),
            _ => None,
        }
    }
}

/// Error envelope returned by the API.
///
/// ```json
/// {"success": false, "error_code": 404, "error_message": "not found"}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ErrorResponse {
    /// Application error code.
    #[serde(default)]
    pub error_code: i64,
    /// Human-readable error message.
    #[serde(default)]
    pub error_message: String,
    /// Always false for error envelopes.
    #[serde(default)]
    pub success: bool,
}

/// Error returned by the server for a status code of 400 or above.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code of the response.
    pub status_code: u16,
    /// Decoded error envelope.
    pub response: ErrorResponse,
}

impl ApiError {
    /// Application error code from the envelope.
    pub fn error_code(&self) -> i64 {
        self.response.error_code
    }

    /// Error message from the envelope.
    pub fn error_message(&self) -> &str {
        &self.response.error_message
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.response.error_message.is_empty() && self.status_code > 0 {
            write!(f, "{} ({})", self.response.error_message, self.status_code)
        } else {
            write!(f, "unknown error ({})", self.status_code)
        }
    }
}

impl std::error::Error for ApiError {}
