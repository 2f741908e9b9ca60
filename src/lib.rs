//! Weather Relay - a small weather lookup service and its presentation client
//!
//! The relay accepts a city name or coordinate pair, forwards it to the
//! weather provider with a server-held API key, and returns the provider's
//! JSON. Forecasts gain derived `daily` and `hourly` fields. The client owns
//! per-session query state and derives what the view renders.
//!
//! ## Architecture
//!
//! - `config/` - Environment-based configuration
//! - `error` - Relay error taxonomy and its HTTP mapping
//! - `models/` - Request/response shapes and weather domain types
//! - `services/` - Relay logic, provider client, forecast derivation, metrics
//! - `handlers/` - HTTP handlers and the app factory
//! - `middleware/` - Request IDs and metrics collection
//! - `utils/` - Request metadata helpers
//! - `client/` - Presentation client: state, events, display derivations
//!
//! ## Quick Start
//!
//! ```no_run
//! use weather_relay::{AppMetrics, MetricsConfig, RelayConfig, WeatherRelay, create_app};
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     let config = RelayConfig::from_env().map_err(|e| std::io::Error::other(e.to_string()))?;
//!     let metrics = AppMetrics::new().map_err(|e| std::io::Error::other(e.to_string()))?;
//!     let relay = WeatherRelay::new(&config, Some(metrics.clone()))
//!         .map_err(|e| std::io::Error::other(e.to_string()))?;
//!     let _app = create_app(relay, metrics, MetricsConfig::default());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

pub use client::{
    AnimationCategory, ClientError, ClientEvent, ClientState, DisplayState, FixedGeolocator,
    GeolocationError, Geolocator, HttpRelayClient, NoGeolocation, Phase, RelayApi,
    RequestTicket, WeatherClient,
};
pub use config::{LogFormat, MetricsConfig, RelayConfig, ServerConfig};
pub use error::{ConfigError, ErrorBody, RelayError};
pub use handlers::{
    ROUTES, available_routes, create_app, create_openapi_spec, forecast_by_city,
    forecast_by_coordinates, get_metrics, health, route_not_found, weather_by_city,
    weather_by_coordinates,
};
pub use middleware::{MetricsMiddleware, RequestIdMiddleware};
pub use models::{
    CityQuery, CoordinateQuery, Coordinates, ForecastEntry, ForecastSeries, HealthResponse,
    Observation, RouteNotFoundResponse, WeatherQuery,
};
pub use services::{
    AppMetrics, UpstreamClient, UpstreamClientError, UpstreamEndpoint, WeatherRelay,
    daily_subset, decorate_forecast, hourly_window,
};
