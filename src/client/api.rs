//! HTTP access to the relay from the presentation client.

use crate::{
    client::geolocation::GeolocationError,
    error::ErrorBody,
    models::{Coordinates, ForecastSeries, Observation},
};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Client-side failures, each convertible to a display-ready message
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Relay returned status {status}: {message}")]
    Relay {
        status: u16,
        kind: String,
        message: String,
    },

    #[error("Failed to decode relay response: {0}")]
    Decode(String),

    #[error(transparent)]
    Geolocation(#[from] GeolocationError),

    #[error("Invalid relay URL '{0}'")]
    InvalidUrl(String),
}

impl ClientError {
    /// Message suitable for showing in place of weather data
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Relay {
                status: 400 | 404,
                message,
                ..
            } => message.clone(),
            ClientError::Relay { status: 401, .. } => {
                "The weather service is misconfigured. Please try again later.".to_string()
            }
            ClientError::Relay { .. } => {
                "The weather service is temporarily unavailable. Please try again.".to_string()
            }
            ClientError::Network(_) => {
                "Unable to reach the weather service. Check your connection.".to_string()
            }
            ClientError::Decode(_) => {
                "Received an unexpected response from the weather service.".to_string()
            }
            ClientError::Geolocation(e) => e.user_message().to_string(),
            ClientError::InvalidUrl(_) => "The weather service address is invalid.".to_string(),
        }
    }
}

/// Operations the client needs from the relay
#[async_trait]
pub trait RelayApi: Send + Sync {
    async fn weather_by_city(&self, city: &str) -> Result<Observation, ClientError>;

    async fn weather_by_coordinates(&self, coords: Coordinates)
    -> Result<Observation, ClientError>;

    async fn forecast(&self, coords: Coordinates) -> Result<ForecastSeries, ClientError>;
}

/// `RelayApi` over HTTP
#[derive(Debug, Clone)]
pub struct HttpRelayClient {
    http: Client,
    base_url: String,
}

impl HttpRelayClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        url::Url::parse(&base_url).map_err(|_| ClientError::InvalidUrl(base_url.clone()))?;

        Ok(Self {
            http: Client::new(),
            base_url,
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let (kind, message) = match serde_json::from_str::<ErrorBody>(&body) {
                Ok(parsed) => (parsed.error, parsed.message),
                Err(_) => (
                    "unknown".to_string(),
                    status.canonical_reason().unwrap_or("error").to_string(),
                ),
            };
            return Err(ClientError::Relay {
                status: status.as_u16(),
                kind,
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

fn coordinate_params(coords: Coordinates) -> [(&'static str, String); 2] {
    [("lat", coords.lat.to_string()), ("lon", coords.lon.to_string())]
}

#[async_trait]
impl RelayApi for HttpRelayClient {
    async fn weather_by_city(&self, city: &str) -> Result<Observation, ClientError> {
        self.get("/weather", &[("city", city.to_string())]).await
    }

    async fn weather_by_coordinates(
        &self,
        coords: Coordinates,
    ) -> Result<Observation, ClientError> {
        self.get("/weather/geo", &coordinate_params(coords)).await
    }

    async fn forecast(&self, coords: Coordinates) -> Result<ForecastSeries, ClientError> {
        self.get("/forecast", &coordinate_params(coords)).await
    }
}
