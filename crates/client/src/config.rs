//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DECO_WISHLIST_URL` - Base URL of the wishlist service
//!
//! ## Optional
//! - `DECO_DATA_DIR` - Directory for the local mirror (default: `.deco-estilos`)
//! - `DECO_SERVICE_TOKEN` - Bearer token forwarded to the wishlist service

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

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
/// Implements `Debug` manually to redact the service token.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the wishlist service (no trailing slash)
    pub wishlist_url: String,
    /// Directory holding the local mirror files
    pub data_dir: PathBuf,
    /// Optional bearer token for the wishlist service
    pub service_token: Option<SecretString>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("wishlist_url", &self.wishlist_url)
            .field("data_dir", &self.data_dir)
            .field(
                "service_token",
                &self.service_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let wishlist_url = normalize_base_url(get_required_env("DECO_WISHLIST_URL")?);
        let data_dir = PathBuf::from(get_env_or_default("DECO_DATA_DIR", ".deco-estilos"));
        let service_token = get_optional_env("DECO_SERVICE_TOKEN").map(SecretString::from);

        Ok(Self {
            wishlist_url,
            data_dir,
            service_token,
        })
    }
}

/// Strip a trailing slash so endpoint paths can be appended uniformly.
fn normalize_base_url(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
