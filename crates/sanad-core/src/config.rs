//! Configuration for the SANAD backend connection

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default backend base URL.
pub const DEFAULT_BASE_URL: &str = "https://sanad-app.tech";

/// Default client-side request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the SANAD REST backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Backend base URL, without a trailing slash
    pub base_url: String,
    /// Client-side timeout applied to every request, in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from the environment.
    ///
    /// `SANAD_API_URL` overrides the base URL and `SANAD_API_TIMEOUT_SECS`
    /// the request timeout; unset or unparseable values fall back to the
    /// defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("SANAD_API_URL") {
            if !url.is_empty() {
                config.base_url = url;
            }
        }
        if let Ok(secs) = std::env::var("SANAD_API_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse() {
                config.timeout_secs = secs;
            }
        }
        config
    }

    /// Builder pattern: set base URL
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder pattern: set request timeout
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Join a path onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_join() {
        let config = ApiConfig::new().with_base_url("https://example.test/");
        assert_eq!(
            config.endpoint("/api/v1/customer/auth/login"),
            "https://example.test/api/v1/customer/auth/login"
        );
        assert_eq!(config.endpoint("ping"), "https://example.test/ping");
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::new();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }
}
