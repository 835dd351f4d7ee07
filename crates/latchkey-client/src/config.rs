//! Client configuration

use std::time::Duration;

use latchkey_types::{Command, Credentials, Identity, SessionToken};

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// No endpoint given
    #[error("endpoint is empty")]
    EmptyEndpoint,

    /// Endpoint is not an http(s) URL
    #[error("endpoint must start with http:// or https://: {0}")]
    InvalidEndpoint(String),
}

/// Client configuration
#[derive(Clone)]
pub struct ClientConfig {
    endpoint: String,
    request_timeout: Duration,
    admin: Option<Credentials>,
}

impl ClientConfig {
    /// Default per-request timeout
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a configuration for the service at `endpoint`
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ConfigError> {
        let endpoint = endpoint.into();
        let endpoint = endpoint.trim().trim_end_matches('/').to_string();
        if endpoint.is_empty() {
            return Err(ConfigError::EmptyEndpoint);
        }
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(ConfigError::InvalidEndpoint(endpoint));
        }

        Ok(Self {
            endpoint,
            request_timeout: Self::DEFAULT_REQUEST_TIMEOUT,
            admin: None,
        })
    }

    /// Set the per-request timeout
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Use an administrator session for privileged calls
    #[must_use]
    pub fn with_admin_credentials(
        mut self,
        identity: impl Into<Identity>,
        token: SessionToken,
    ) -> Self {
        self.admin = Some(Credentials::new(identity, token));
        self
    }

    /// Service base URL without a trailing slash
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Per-request timeout
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Administrator session, if configured
    pub fn admin_credentials(&self) -> Option<&Credentials> {
        self.admin.as_ref()
    }

    /// Full URL of a command
    pub fn url(&self, command: Command) -> String {
        format!("{}{}", self.endpoint, command.path())
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("request_timeout", &self.request_timeout)
            .field(
                "admin",
                &self.admin.as_ref().map(|c| format!("{} [REDACTED]", c.identity)),
            )
            .finish()
    }
}
