//! Request and response models for the relay endpoints.

use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

/// Response model for the health check endpoint
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct HealthResponse {
    pub status: String,
    /// Seconds since the server started
    pub uptime_seconds: f64,
    /// Whether an upstream credential is configured
    pub api_key_configured: bool,
}

/// Query parameters for city lookups
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct CityQuery {
    /// City name (e.g., "London")
    pub city: Option<String>,
}

/// Query parameters for coordinate lookups
///
/// Values stay as strings so non-numeric input is reported with the relay's
/// own error body instead of the extractor's.
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct CoordinateQuery {
    /// Latitude in [-90, 90]
    pub lat: Option<String>,
    /// Longitude in [-180, 180]
    pub lon: Option<String>,
}

/// Body returned for unmatched routes
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct RouteNotFoundResponse {
    pub error: String,
    pub message: String,
    pub available_routes: Vec<String>,
}
