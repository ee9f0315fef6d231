//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHOPFRONT_API_BASE_URL` - Backend API root (default: `http://localhost:5000/api`)
//! - `SHOPFRONT_HTTP_TIMEOUT_SECS` - Per-request transport timeout (default: 30)
//! - `SHOPFRONT_TOKEN_READ_TIMEOUT_MS` - Upper bound on a token store read (default: 2000)
//! - `SHOPFRONT_TOKEN_DIR` - Directory holding the `access_token` file
//! - `SHOPFRONT_ACCESS_TOKEN` - Bearer token to seed the in-memory token store

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Default backend API root.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

const DEFAULT_HTTP_TIMEOUT_SECS: &str = "30";
const DEFAULT_TOKEN_READ_TIMEOUT_MS: &str = "2000";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client configuration.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct ClientConfig {
    /// Backend API root; endpoint paths are appended to it.
    pub api_base_url: Url,
    /// Transport timeout applied to every request.
    pub http_timeout: Duration,
    /// Upper bound on reading the bearer token before a request.
    pub token_read_timeout: Duration,
    /// Directory holding the persisted `access_token` file.
    pub token_dir: Option<PathBuf>,
    /// Bearer token to seed the in-memory token store with.
    pub access_token: Option<SecretString>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_base_url", &self.api_base_url.as_str())
            .field("http_timeout", &self.http_timeout)
            .field("token_read_timeout", &self.token_read_timeout)
            .field("token_dir", &self.token_dir)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl ClientConfig {
    /// Configuration pointing at `api_base_url` with default timeouts.
    #[must_use]
    pub const fn new(api_base_url: Url) -> Self {
        Self {
            api_base_url,
            http_timeout: Duration::from_secs(30),
            token_read_timeout: Duration::from_secs(2),
            token_dir: None,
            access_token: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = parse_base_url(
            "SHOPFRONT_API_BASE_URL",
            &get_env_or_default("SHOPFRONT_API_BASE_URL", DEFAULT_API_BASE_URL),
        )?;
        let http_timeout = Duration::from_secs(parse_positive(
            "SHOPFRONT_HTTP_TIMEOUT_SECS",
            &get_env_or_default("SHOPFRONT_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS),
        )?);
        let token_read_timeout = Duration::from_millis(parse_positive(
            "SHOPFRONT_TOKEN_READ_TIMEOUT_MS",
            &get_env_or_default(
                "SHOPFRONT_TOKEN_READ_TIMEOUT_MS",
                DEFAULT_TOKEN_READ_TIMEOUT_MS,
            ),
        )?);
        let token_dir = get_optional_env("SHOPFRONT_TOKEN_DIR").map(PathBuf::from);
        let access_token = get_optional_env("SHOPFRONT_ACCESS_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .map(SecretString::from);

        Ok(Self {
            api_base_url,
            http_timeout,
            token_read_timeout,
            token_dir,
            access_token,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an http(s) base URL that can have path segments appended.
fn parse_base_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be a hierarchical URL".to_string(),
        ));
    }
    Ok(url)
}

/// Parse a strictly positive integer.
fn parse_positive(key: &str, value: &str) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be greater than zero".to_string(),
        )),
        Ok(n) => Ok(n),
        Err(e) => Err(ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
    }
}
