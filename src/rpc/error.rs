//! Admin API error definitions.

use thiserror::Error;

/// Errors that can occur calling the admin API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RpcError {
    /// Base URL or method path could not form a valid URL.
    #[error("invalid API URL: {0}")]
    InvalidUrl(String),

    /// Connection or request failed before a response arrived.
    #[error("transport error: {0}")]
    Transport(String),

    /// No response within the configured timeout.
    #[error("{method}: timeout after {secs} seconds")]
    Timeout { method: String, secs: u64 },

    /// HTTP status outside the 2xx range.
    #[error("{method}: HTTP status {status}")]
    Status { method: String, status: u16 },

    /// The server answered with an error envelope.
    #[error("{message} ({code})")]
    Server { code: String, message: String },

    /// Response body did not match the expected schema.
    #[error("{method}: malformed response: {reason}")]
    Decode { method: String, reason: String },
}

impl RpcError {
    /// Server-side errors caused by the caller, such as an unknown domain.
    pub fn is_user_error(&self) -> bool {
        matches!(self, RpcError::Server { code, .. } if code.starts_with("user:"))
    }
}

/// Result type for admin API calls.
pub type RpcResult<T> = Result<T, RpcError>;
