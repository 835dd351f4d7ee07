//! Configuration for the Auth API service.

use std::path::PathBuf;
use std::time::Duration;

use axum::http::HeaderValue;
use latchkey_auth_core::{AuthConfig, HashParams};

/// Auth API configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Snapshot document holding the full authorization state
    pub data_file: PathBuf,

    /// HTTP server port
    pub http_port: u16,

    /// Auth core configuration
    pub auth: AuthConfig,

    /// Request timeout
    pub request_timeout: Duration,

    /// Metrics enabled
    pub metrics_enabled: bool,

    /// Allowed CORS origins; `None` allows any origin
    pub cors_allowed_origins: Option<Vec<HeaderValue>>,
}

impl Config {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8080;

    /// Configuration with defaults for everything but the data file
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
            http_port: Self::DEFAULT_HTTP_PORT,
            auth: AuthConfig::default(),
            request_timeout: Duration::from_secs(30),
            metrics_enabled: true,
            cors_allowed_origins: None,
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let data_file = std::env::var("DATA_FILE").map_err(|_| ConfigError::Missing("DATA_FILE"))?;
        let mut config = Self::new(data_file);

        // Server port (PORT is accepted for platforms that inject it)
        if let Ok(port) = std::env::var("HTTP_PORT") {
            config.http_port = port.parse().map_err(|_| ConfigError::Invalid("HTTP_PORT"))?;
        } else if let Ok(port) = std::env::var("PORT") {
            config.http_port = port.parse().map_err(|_| ConfigError::Invalid("PORT"))?;
        }

        // Request timeout (default 30 seconds)
        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("REQUEST_TIMEOUT_SECS"))?;
        config.request_timeout = Duration::from_secs(request_timeout_secs);

        // Metrics
        config.metrics_enabled = std::env::var("METRICS_ENABLED")
            .unwrap_or_else(|_| "true".to_string())
            .parse()
            .unwrap_or(true);

        // CORS
        if let Ok(origins) = std::env::var("CORS_ALLOWED_ORIGINS") {
            config.cors_allowed_origins = parse_origins(&origins)?;
        }

        // Password hashing cost
        let defaults = HashParams::default();
        let hash = HashParams {
            memory_kib: env_or("PASSWORD_HASH_MEMORY_KIB", defaults.memory_kib)?,
            iterations: env_or("PASSWORD_HASH_ITERATIONS", defaults.iterations)?,
            parallelism: env_or("PASSWORD_HASH_PARALLELISM", defaults.parallelism)?,
        };
        config.auth = AuthConfig::new().with_hash_params(hash);

        Ok(config)
    }
}

fn env_or(name: &'static str, default: u32) -> Result<u32, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value.parse().map_err(|_| ConfigError::Invalid(name)),
        Err(_) => Ok(default),
    }
}

/// Comma-separated origins. Empty or `*` means any origin.
fn parse_origins(raw: &str) -> Result<Option<Vec<HeaderValue>>, ConfigError> {
    let origins: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if origins.is_empty() || origins.contains(&"*") {
        return Ok(None);
    }

    origins
        .into_iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|_| ConfigError::Invalid("CORS_ALLOWED_ORIGINS"))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
