//! Device position capability.

use crate::models::Coordinates;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GeolocationError {
    #[error("Geolocation is not supported")]
    Unsupported,

    #[error("Location permission denied")]
    Denied,

    #[error("Location request timed out")]
    Timeout,
}

impl GeolocationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            GeolocationError::Unsupported => "Geolocation is not supported on this device.",
            GeolocationError::Denied | GeolocationError::Timeout => {
                "Unable to retrieve your location. Please allow location access or search by city."
            }
        }
    }
}

/// Source of the viewer's position
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}

/// Always reports the same position
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocator(pub Coordinates);

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        Ok(self.0)
    }
}

/// A device without a position capability
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeolocation;

#[async_trait]
impl Geolocator for NoGeolocation {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        Err(GeolocationError::Unsupported)
    }
}
