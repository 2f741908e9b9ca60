//! Weather relay: validates lookups, forwards them to the provider, and maps
//! provider failures onto the relay error taxonomy.

use crate::{
    config::RelayConfig,
    error::{ConfigError, RelayError},
    models::WeatherQuery,
    services::{
        forecast::decorate_forecast,
        metrics::AppMetrics,
        upstream::{UpstreamClient, UpstreamClientError, UpstreamEndpoint, is_unauthorized},
    },
};
use serde_json::Value;
use tracing::error;

/// Stateless relay to the weather provider
///
/// Safe to share across workers; each call is independent.
#[derive(Clone)]
pub struct WeatherRelay {
    client: UpstreamClient,
    api_key_configured: bool,
}

impl WeatherRelay {
    /// Create a relay from injected configuration
    pub fn new(config: &RelayConfig, metrics: Option<AppMetrics>) -> Result<Self, ConfigError> {
        Ok(Self {
            client: UpstreamClient::new(config, metrics)?,
            api_key_configured: config.has_api_key(),
        })
    }

    pub fn api_key_configured(&self) -> bool {
        self.api_key_configured
    }

    /// Current conditions for a free-text city name
    pub async fn get_weather_by_city(&self, city: &str) -> Result<Value, RelayError> {
        let query = WeatherQuery::city(Some(city))?;
        self.fetch_observation(&query).await
    }

    /// Current conditions for a raw coordinate pair
    pub async fn get_weather_by_coordinates(
        &self,
        lat: Option<&str>,
        lon: Option<&str>,
    ) -> Result<Value, RelayError> {
        let query = WeatherQuery::coordinates(lat, lon)?;
        self.fetch_observation(&query).await
    }

    /// Forecast series for a raw coordinate pair, with `daily` and `hourly`
    pub async fn get_forecast(
        &self,
        lat: Option<&str>,
        lon: Option<&str>,
    ) -> Result<Value, RelayError> {
        let query = WeatherQuery::coordinates(lat, lon)?;
        self.fetch_forecast(&query).await
    }

    /// Forecast series for a city name, with `daily` and `hourly`
    pub async fn get_forecast_by_city(&self, city: &str) -> Result<Value, RelayError> {
        let query = WeatherQuery::city(Some(city))?;
        self.fetch_forecast(&query).await
    }

    /// Provider observation payload, unmodified
    pub async fn fetch_observation(&self, query: &WeatherQuery) -> Result<Value, RelayError> {
        self.client
            .get_json(UpstreamEndpoint::Weather, &query.location_params())
            .await
            .map_err(|e| map_upstream_error(query, e))
    }

    /// Provider forecast payload decorated with the derived fields
    pub async fn fetch_forecast(&self, query: &WeatherQuery) -> Result<Value, RelayError> {
        self.client
            .get_json(UpstreamEndpoint::Forecast, &query.location_params())
            .await
            .map(decorate_forecast)
            .map_err(|e| map_upstream_error(query, e))
    }
}

/// Map a provider failure for `query` to the relay taxonomy
pub fn map_upstream_error(query: &WeatherQuery, err: UpstreamClientError) -> RelayError {
    match err.status() {
        Some(404) => RelayError::NotFound(query.not_found_message()),
        Some(status) if is_unauthorized(status) => {
            error!(%query, "Weather provider rejected the configured API key");
            RelayError::Unauthorized
        }
        _ => {
            error!(%query, error = %err, "Weather provider request failed");
            RelayError::Upstream(err.user_message())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(status: u16) -> UpstreamClientError {
        UpstreamClientError::Status {
            status,
            body: String::new(),
        }
    }

    #[test]
    fn test_not_found_mapping_names_city() {
        let query = WeatherQuery::City("Nowhereville".to_string());
        match map_upstream_error(&query, status(404)) {
            RelayError::NotFound(msg) => assert!(msg.contains("Nowhereville")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unauthorized_mapping() {
        let query = WeatherQuery::City("London".to_string());
        assert_eq!(
            map_upstream_error(&query, status(401)),
            RelayError::Unauthorized
        );
    }

    #[test]
    fn test_other_failures_map_to_upstream() {
        let query = WeatherQuery::City("London".to_string());
        for code in [400, 403, 429, 500, 503] {
            assert!(matches!(
                map_upstream_error(&query, status(code)),
                RelayError::Upstream(_)
            ));
        }
        assert!(matches!(
            map_upstream_error(&query, UpstreamClientError::Timeout),
            RelayError::Upstream(_)
        ));
        assert!(matches!(
            map_upstream_error(&query, UpstreamClientError::Decode("bad".into())),
            RelayError::Upstream(_)
        ));
    }

    #[tokio::test]
    async fn test_validation_happens_before_any_call() {
        // Unroutable base URL: any outbound call would surface as Upstream
        let config = RelayConfig::new("key", "http://127.0.0.1:9").unwrap();
        let relay = WeatherRelay::new(&config, None).unwrap();

        assert!(matches!(
            relay.get_weather_by_city("  ").await,
            Err(RelayError::BadRequest(_))
        ));
        assert!(matches!(
            relay.get_weather_by_coordinates(Some("91"), Some("0")).await,
            Err(RelayError::BadRequest(_))
        ));
        assert!(matches!(
            relay.get_forecast(None, Some("0")).await,
            Err(RelayError::BadRequest(_))
        ));
        assert!(matches!(
            relay.get_forecast_by_city("").await,
            Err(RelayError::BadRequest(_))
        ));
    }
}
