//! Relay configuration: upstream provider credential and connection settings.

use crate::error::ConfigError;
use std::{env, fmt};

/// Default OpenWeatherMap API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Default unit system requested from the provider
pub const DEFAULT_UNITS: &str = "metric";

/// Configuration for the upstream weather provider
///
/// The API key is loaded once at startup and injected into the relay. It is
/// attached to outbound requests only and never returned to callers.
#[derive(Clone)]
pub struct RelayConfig {
    pub api_key: String,
    pub base_url: String,
    pub units: String,
    pub timeout_seconds: Option<u64>,
}

impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("units", &self.units)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl RelayConfig {
    /// Build a configuration, rejecting a blank key or an unparseable base URL
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        let base_url = base_url.into().trim_end_matches('/').to_string();
        url::Url::parse(&base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base_url.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            api_key,
            base_url,
            units: DEFAULT_UNITS.to_string(),
            timeout_seconds: None,
        })
    }

    /// Load configuration from environment variables
    ///
    /// Fails when `OPENWEATHER_API_KEY` is absent or blank so the server
    /// refuses to start without a credential.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("OPENWEATHER_API_KEY").map_err(|_| ConfigError::MissingApiKey)?;

        let base_url =
            env::var("OPENWEATHER_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let units = env::var("OPENWEATHER_UNITS")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_UNITS.to_string());

        let timeout_seconds = env::var("UPSTREAM_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|secs: &u64| *secs > 0);

        Ok(Self {
            units,
            timeout_seconds,
            ..Self::new(api_key, base_url)?
        })
    }

    /// Whether a credential is present, as reported by the health endpoint
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }
}

/// HTTP server bind settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8080);

        Self { host, port }
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
