//! Client configuration with environment overrides.

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api/v1";

/// Access tokens live 15 minutes server-side; renewing every 4 leaves at
/// least two more tick windows before expiry if one renewal fails.
pub const DEFAULT_REFRESH_SECS: u64 = 240;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub refresh_interval: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_SECS),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Self::default() }
    }

    /// Read configuration from `ARENDA_BASE_URL`, `ARENDA_REFRESH_SECS` and
    /// `ARENDA_TIMEOUT_SECS`, falling back to defaults for anything unset or
    /// unparsable.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("ARENDA_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let refresh_secs = std::env::var("ARENDA_REFRESH_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_REFRESH_SECS);
        let timeout_secs = std::env::var("ARENDA_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Self {
            base_url,
            refresh_interval: Duration::from_secs(refresh_secs),
            request_timeout: Duration::from_secs(timeout_secs),
        }
    }
}
