//! Application error types

use fundus_domain::{AuthError, DomainError};
use thiserror::Error;

use crate::ports::TransportError;

/// Errors surfaced to callers of the API clients.
///
/// Mirrors the failure taxonomy of the system: transport failures (no
/// response), non-2xx responses (validation and business errors bubble
/// unmodified in `body`), decode failures, and irrecoverable auth
/// failures after a refresh attempt.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request produced no response.
    #[error("network error: {0}")]
    Network(#[from] TransportError),

    /// The server answered with a non-2xx status. The body is passed
    /// through untouched for the caller to display or inspect.
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// A 2xx response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// A request body or query string could not be encoded.
    #[error("failed to encode request: {0}")]
    Encode(String),

    /// The session was torn down because the access token was rejected
    /// and could not be refreshed. The caller must re-authenticate.
    #[error("session expired: {0}")]
    SessionExpired(#[source] AuthError),

    /// A domain-level validation failed before any network call.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ApiError {
    /// The HTTP status of this error, when one exists.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
