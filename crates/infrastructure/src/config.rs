//! Environment-based configuration loading.
//!
//! Reads `FUNDUS_*` environment variables into a [`ClientConfig`].
//! Unset variables fall back to the domain defaults; set-but-invalid
//! values are hard errors rather than silent fallbacks.

use fundus_domain::{ClientConfig, DomainError, DomainResult};

/// Environment variable for the API base URL.
pub const ENV_API_BASE_URL: &str = "FUNDUS_API_BASE_URL";
/// Environment variable for the media base URL.
pub const ENV_MEDIA_URL: &str = "FUNDUS_MEDIA_URL";
/// Environment variable for the maximum upload size in bytes.
pub const ENV_MAX_UPLOAD_BYTES: &str = "FUNDUS_MAX_UPLOAD_BYTES";
/// Environment variable for the comma-separated upload extension allow-list.
pub const ENV_ALLOWED_IMAGE_EXTENSIONS: &str = "FUNDUS_ALLOWED_IMAGE_EXTENSIONS";
/// Environment variable for the uniform request timeout in milliseconds.
pub const ENV_TIMEOUT_MS: &str = "FUNDUS_TIMEOUT_MS";

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/";
const DEFAULT_MEDIA_URL: &str = "http://localhost:8000/media/";

/// Looks a key up in the process environment.
///
/// Variables containing invalid Unicode are treated as unset.
#[must_use]
pub fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Loads the client configuration from the process environment.
///
/// # Errors
///
/// Returns a [`DomainError`] when a set variable fails to parse.
pub fn load_config() -> DomainResult<ClientConfig> {
    load_config_from(env_lookup)
}

/// Loads the client configuration through an arbitrary lookup function.
///
/// Separated from [`load_config`] so tests can supply values without
/// mutating the process environment.
///
/// # Errors
///
/// Returns a [`DomainError`] when a set variable fails to parse.
pub fn load_config_from<F>(lookup: F) -> DomainResult<ClientConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let api_base_url =
        lookup(ENV_API_BASE_URL).unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
    let media_url = lookup(ENV_MEDIA_URL).unwrap_or_else(|| DEFAULT_MEDIA_URL.to_string());

    let mut config = ClientConfig::new(&api_base_url, &media_url)?;

    if let Some(raw) = lookup(ENV_MAX_UPLOAD_BYTES) {
        let max = parse_u64(ENV_MAX_UPLOAD_BYTES, &raw)?;
        config = config.with_max_upload_bytes(max);
    }

    if let Some(raw) = lookup(ENV_ALLOWED_IMAGE_EXTENSIONS) {
        let extensions: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(ToString::to_string)
            .collect();
        if extensions.is_empty() {
            return Err(DomainError::InvalidConfigValue {
                key: ENV_ALLOWED_IMAGE_EXTENSIONS.to_string(),
                message: "extension list is empty".to_string(),
            });
        }
        config = config.with_allowed_image_extensions(extensions);
    }

    if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
        let timeout_ms = parse_u64(ENV_TIMEOUT_MS, &raw)?;
        config = config.with_timeout_ms(timeout_ms);
    }

    Ok(config)
}

fn parse_u64(key: &str, raw: &str) -> DomainResult<u64> {
    raw.trim()
        .parse()
        .map_err(|e| DomainError::InvalidConfigValue {
            key: key.to_string(),
            message: format!("{raw:?}: {e}"),
        })
}
