//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The API base URL is invalid or malformed.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// The media URL is invalid or malformed.
    #[error("invalid media URL: {0}")]
    InvalidMediaUrl(String),

    /// A configuration value could not be parsed.
    #[error("invalid configuration value for {key}: {message}")]
    InvalidConfigValue {
        /// The configuration key that failed to parse.
        key: String,
        /// Why the value was rejected.
        message: String,
    },

    /// An upload exceeds the configured size limit.
    #[error("upload of {size} bytes exceeds the limit of {max} bytes")]
    UploadTooLarge {
        /// Size of the rejected payload.
        size: u64,
        /// Configured maximum.
        max: u64,
    },

    /// An upload has a file extension outside the allow-list.
    #[error("unsupported image format: {extension}")]
    UnsupportedImageFormat {
        /// The rejected extension.
        extension: String,
    },

    /// An upload file name carries no extension at all.
    #[error("file name has no extension: {file_name}")]
    MissingExtension {
        /// The offending file name.
        file_name: String,
    },

    /// An identifier is invalid or empty.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// Authentication errors surfaced by the refresh path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No session is stored, so there is nothing to refresh.
    #[error("no refresh token available")]
    MissingRefreshToken,

    /// The refresh exchange was rejected by the server.
    #[error("refresh rejected with status {status}: {message}")]
    RefreshRejected {
        /// HTTP status returned by the refresh endpoint.
        status: u16,
        /// Response body, usually a JSON error document.
        message: String,
    },

    /// The refresh exchange could not reach the server.
    #[error("refresh failed: {message}")]
    Network {
        /// Transport-level error description.
        message: String,
    },

    /// The refresh response could not be decoded.
    #[error("malformed refresh response: {message}")]
    MalformedResponse {
        /// What went wrong while decoding.
        message: String,
    },
}
