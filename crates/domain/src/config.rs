//! Client configuration.
//!
//! [`ClientConfig`] carries the API base URL, media URL, upload limits
//! and the uniform request timeout. Values are typically loaded from
//! environment variables by the infrastructure layer; the type itself
//! is pure and validated on construction.

use url::Url;

use crate::error::{DomainError, DomainResult};

/// Default request timeout applied uniformly to all calls.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default maximum upload size (10 MiB, mirroring the backend limit).
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// File extensions accepted for retinal image uploads.
pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff"];

/// Configuration for the Fundus API client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the REST API, e.g. `https://api.example.com/api/`.
    pub api_base_url: Url,
    /// Base URL for media files (uploaded images).
    pub media_url: Url,
    /// Maximum accepted upload size in bytes.
    pub max_upload_bytes: u64,
    /// Lower-case file extensions accepted for image uploads.
    pub allowed_image_extensions: Vec<String>,
    /// Uniform timeout for all requests, in milliseconds.
    pub timeout_ms: u64,
}

impl ClientConfig {
    /// Create a configuration with default limits.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidBaseUrl`] or
    /// [`DomainError::InvalidMediaUrl`] if a URL does not parse.
    pub fn new(api_base_url: &str, media_url: &str) -> DomainResult<Self> {
        let api_base_url = Url::parse(api_base_url)
            .map_err(|e| DomainError::InvalidBaseUrl(format!("{api_base_url}: {e}")))?;
        let media_url = Url::parse(media_url)
            .map_err(|e| DomainError::InvalidMediaUrl(format!("{media_url}: {e}")))?;

        Ok(Self {
            api_base_url,
            media_url,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            allowed_image_extensions: DEFAULT_IMAGE_EXTENSIONS
                .iter()
                .map(ToString::to_string)
                .collect(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        })
    }

    /// Set the maximum upload size.
    #[must_use]
    pub const fn with_max_upload_bytes(mut self, max: u64) -> Self {
        self.max_upload_bytes = max;
        self
    }

    /// Set the accepted image extensions (stored lower-case).
    #[must_use]
    pub fn with_allowed_image_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_image_extensions = extensions
            .into_iter()
            .map(|e| e.into().to_lowercase())
            .collect();
        self
    }

    /// Set the uniform request timeout.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Resolve an API path against the base URL.
    ///
    /// The path is joined as a relative segment, so a base of
    /// `https://host/api/` and a path of `patients/` yields
    /// `https://host/api/patients/`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidIdentifier`] if the joined URL is
    /// not valid.
    pub fn endpoint(&self, path: &str) -> DomainResult<Url> {
        self.api_base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| DomainError::InvalidIdentifier(format!("{path}: {e}")))
    }

    /// Returns true if the extension is on the upload allow-list.
    #[must_use]
    pub fn accepts_extension(&self, extension: &str) -> bool {
        let lowered = extension.to_lowercase();
        self.allowed_image_extensions.iter().any(|e| *e == lowered)
    }
}
