//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `CATALOG_BASE_URL` - Base URL of the mock catalog API
//! - `CART_STORE_PATH` - Path of the persisted key-value store file
//!   (default: data/local-store.json)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Trace sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default base URL of the mock catalog API.
const DEFAULT_CATALOG_BASE_URL: &str =
    "https://679e9cf4946b0e23c063c401.mockapi.io/stech-store/v1";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Base URL of the mock catalog API
    pub catalog_base_url: Url,
    /// Path of the persisted key-value store file (the `localStorage` analog)
    pub cart_store_path: PathBuf,
    /// Sentry error tracking configuration
    pub sentry: SentryConfig,
}

/// Sentry error tracking configuration.
#[derive(Debug, Clone, Default)]
pub struct SentryConfig {
    /// Sentry DSN; error tracking is disabled when unset
    pub dsn: Option<String>,
    /// Environment name reported to Sentry
    pub environment: Option<String>,
    /// Error event sample rate
    pub sample_rate: f32,
    /// Performance trace sample rate
    pub traces_sample_rate: f32,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparsable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;
        let catalog_base_url = get_env_or_default("CATALOG_BASE_URL", DEFAULT_CATALOG_BASE_URL)
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("CATALOG_BASE_URL".to_string(), e.to_string())
            })?;
        let cart_store_path =
            PathBuf::from(get_env_or_default("CART_STORE_PATH", "data/local-store.json"));

        let sentry = SentryConfig::from_env()?;

        Ok(Self {
            host,
            port,
            catalog_base_url,
            cart_store_path,
            sentry,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl SentryConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            dsn: get_optional_env("SENTRY_DSN"),
            environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sample_rate: parse_rate("SENTRY_SAMPLE_RATE", 1.0)?,
            traces_sample_rate: parse_rate("SENTRY_TRACES_SAMPLE_RATE", 0.0)?,
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

/// Parse a sample-rate variable, which must land in `0.0..=1.0`.
fn parse_rate(key: &str, default: f32) -> Result<f32, ConfigError> {
    let Some(raw) = get_optional_env(key) else {
        return Ok(default);
    };
    let rate = raw
        .parse::<f32>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("sample rate must be within 0.0..=1.0 (got {rate})"),
        ));
    }
    Ok(rate)
}
