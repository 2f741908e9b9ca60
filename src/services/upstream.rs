//! HTTP client for the upstream weather provider.
//!
//! Every call is a single attempt: no retries, no circuit breaker, and no
//! timeout unless one is configured. Outcomes are logged and recorded in
//! the application metrics when a collector is attached.

use crate::{config::RelayConfig, error::ConfigError, services::metrics::AppMetrics};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Provider endpoints the relay forwards to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamEndpoint {
    Weather,
    Forecast,
}

impl UpstreamEndpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpstreamEndpoint::Weather => "weather",
            UpstreamEndpoint::Forecast => "forecast",
        }
    }
}

/// Errors that can occur calling the provider
#[derive(Debug, thiserror::Error)]
pub enum UpstreamClientError {
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Request timed out")]
    Timeout,

    #[error("Provider returned status {status}")]
    Status { status: u16, body: String },

    #[error("Failed to decode provider response: {0}")]
    Decode(String),
}

impl UpstreamClientError {
    /// Status code returned by the provider, if it answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Truncated body of an unsuccessful provider response
    pub fn body(&self) -> Option<&str> {
        match self {
            UpstreamClientError::Status { body, .. } => Some(body.as_str()),
            _ => None,
        }
    }

    /// Get a user-friendly error message for API responses
    pub fn user_message(&self) -> String {
        match self {
            UpstreamClientError::Network(_) => {
                "Weather service temporarily unavailable due to network issues".to_string()
            }
            UpstreamClientError::Timeout => {
                "Weather service temporarily unavailable due to timeout".to_string()
            }
            UpstreamClientError::Status { status, .. } => {
                format!("Weather service returned error status {status}")
            }
            UpstreamClientError::Decode(_) => {
                "Weather service returned an unreadable response".to_string()
            }
        }
    }

    fn outcome(&self) -> &'static str {
        match self {
            UpstreamClientError::Network(_) => "network_error",
            UpstreamClientError::Timeout => "timeout",
            UpstreamClientError::Status { .. } => "error_status",
            UpstreamClientError::Decode(_) => "decode_error",
        }
    }
}

impl From<reqwest::Error> for UpstreamClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            UpstreamClientError::Timeout
        } else {
            UpstreamClientError::Network(e)
        }
    }
}

/// Provider client holding the server-side credential
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client,
    base_url: String,
    api_key: String,
    units: String,
    metrics: Option<AppMetrics>,
}

impl UpstreamClient {
    /// Create a client from relay configuration
    pub fn new(config: &RelayConfig, metrics: Option<AppMetrics>) -> Result<Self, ConfigError> {
        let mut builder = Client::builder();
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            units: config.units.clone(),
            metrics,
        })
    }

    /// GET a provider endpoint and decode the body as JSON
    ///
    /// `params` identify the location; the credential and unit system are
    /// appended here and never appear in logs.
    pub async fn get_json(
        &self,
        endpoint: UpstreamEndpoint,
        params: &[(&'static str, String)],
    ) -> Result<Value, UpstreamClientError> {
        let start = Instant::now();
        let result = self.execute(endpoint, params).await;
        let duration = start.elapsed();

        match &result {
            Ok(_) => {
                info!(
                    endpoint = endpoint.as_str(),
                    params = ?params,
                    duration_ms = duration.as_millis(),
                    "Provider request completed successfully"
                );
                self.record(endpoint, "success", duration);
            }
            Err(err) => {
                warn!(
                    endpoint = endpoint.as_str(),
                    params = ?params,
                    status = ?err.status(),
                    body = err.body().unwrap_or_default(),
                    error = %err,
                    duration_ms = duration.as_millis(),
                    "Provider request failed"
                );
                self.record(endpoint, err.outcome(), duration);
            }
        }

        result
    }

    async fn execute(
        &self,
        endpoint: UpstreamEndpoint,
        params: &[(&'static str, String)],
    ) -> Result<Value, UpstreamClientError> {
        let url = format!("{}/{}", self.base_url, endpoint.as_str());

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("appid", self.api_key.as_str()), ("units", self.units.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(UpstreamClientError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| UpstreamClientError::Decode(e.to_string()))
    }

    fn record(&self, endpoint: UpstreamEndpoint, outcome: &str, duration: Duration) {
        if let Some(metrics) = &self.metrics {
            metrics.record_upstream(endpoint.as_str(), outcome, duration);
        }
    }
}

/// Whether a provider status means the credential was rejected
pub fn is_unauthorized(status: u16) -> bool {
    status == StatusCode::UNAUTHORIZED.as_u16()
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_names() {
        assert_eq!(UpstreamEndpoint::Weather.as_str(), "weather");
        assert_eq!(UpstreamEndpoint::Forecast.as_str(), "forecast");
    }

    #[test]
    fn test_error_user_messages() {
        assert!(UpstreamClientError::Timeout.user_message().contains("timeout"));

        let status = UpstreamClientError::Status {
            status: 503,
            body: String::new(),
        };
        assert_eq!(status.status(), Some(503));
        assert!(status.user_message().contains("503"));

        let decode = UpstreamClientError::Decode("eof".into());
        assert_eq!(decode.status(), None);
        assert_eq!(decode.body(), None);
    }

    #[test]
    fn test_status_error_keeps_provider_body() {
        let err = UpstreamClientError::Status {
            status: 429,
            body: truncate_body(&"rate limited ".repeat(40)),
        };
        let body = err.body().unwrap();
        assert!(body.starts_with("rate limited"));
        assert!(body.ends_with("..."));
    }

    #[test]
    fn test_truncate_body() {
        assert_eq!(truncate_body("short"), "short");
        let long = "x".repeat(500);
        let truncated = truncate_body(&long);
        assert_eq!(truncated.len(), 203);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_is_unauthorized() {
        assert!(is_unauthorized(401));
        assert!(!is_unauthorized(403));
    }
}
