//! Weather domain types shared by the relay and the client.
//!
//! The relay forwards provider payloads untouched, so these typed views are
//! only used where a field has to be read: query validation on the relay side
//! and display derivation on the client side.

use crate::error::RelayError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated latitude/longitude pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    /// Build a coordinate pair, rejecting NaN and out-of-range values
    pub fn new(lat: f64, lon: f64) -> Result<Self, RelayError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(RelayError::BadRequest(
                "Latitude must be between -90 and 90".to_string(),
            ));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(RelayError::BadRequest(
                "Longitude must be between -180 and 180".to_string(),
            ));
        }
        Ok(Self { lat, lon })
    }

    /// Parse raw query-string values
    pub fn parse(lat: Option<&str>, lon: Option<&str>) -> Result<Self, RelayError> {
        let (Some(lat), Some(lon)) = (non_blank(lat), non_blank(lon)) else {
            return Err(RelayError::BadRequest(
                "Both 'lat' and 'lon' parameters are required".to_string(),
            ));
        };

        let lat: f64 = lat.parse().map_err(|_| {
            RelayError::BadRequest(format!("Latitude '{lat}' is not a number"))
        })?;
        let lon: f64 = lon.parse().map_err(|_| {
            RelayError::BadRequest(format!("Longitude '{lon}' is not a number"))
        })?;

        Self::new(lat, lon)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// A single lookup: either a free-text city name or a coordinate pair
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherQuery {
    City(String),
    Coordinates(Coordinates),
}

impl WeatherQuery {
    /// Validate a city name; blank input is a bad request
    pub fn city(city: Option<&str>) -> Result<Self, RelayError> {
        non_blank(city)
            .map(|c| WeatherQuery::City(c.to_string()))
            .ok_or_else(|| RelayError::BadRequest("City parameter is required".to_string()))
    }

    pub fn coordinates(lat: Option<&str>, lon: Option<&str>) -> Result<Self, RelayError> {
        Coordinates::parse(lat, lon).map(WeatherQuery::Coordinates)
    }

    /// Provider query parameters identifying the location
    pub fn location_params(&self) -> Vec<(&'static str, String)> {
        match self {
            WeatherQuery::City(city) => vec![("q", city.clone())],
            WeatherQuery::Coordinates(c) => {
                vec![("lat", c.lat.to_string()), ("lon", c.lon.to_string())]
            }
        }
    }

    /// Message used when the provider has no data for this query
    pub fn not_found_message(&self) -> String {
        match self {
            WeatherQuery::City(city) => format!("City '{city}' not found"),
            WeatherQuery::Coordinates(c) => format!("No weather data found for coordinates {c}"),
        }
    }
}

impl fmt::Display for WeatherQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherQuery::City(city) => write!(f, "city '{city}'"),
            WeatherQuery::Coordinates(c) => write!(f, "coordinates {c}"),
        }
    }
}

/// Current-conditions snapshot for one location
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "OwObservation")]
pub struct Observation {
    pub name: String,
    pub country: Option<String>,
    pub coord: Coordinates,
    /// Observation time, unix seconds (UTC)
    pub timestamp: i64,
    /// Location offset from UTC in seconds
    pub utc_offset_seconds: i32,
    pub temperature: f64,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    /// Primary condition label (e.g. "Clouds")
    pub condition: String,
    /// Free-text condition description (e.g. "overcast clouds")
    pub description: String,
    /// Visibility in meters
    pub visibility: Option<f64>,
}

impl Observation {
    /// Location formatted as "Name, CC" when the country is known
    pub fn location(&self) -> String {
        match &self.country {
            Some(country) if !country.is_empty() => format!("{}, {}", self.name, country),
            _ => self.name.clone(),
        }
    }
}

/// One future sample of a forecast series
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "OwForecastEntry")]
pub struct ForecastEntry {
    pub timestamp: i64,
    pub temperature: f64,
    pub condition: String,
    pub description: String,
}

/// Forecast series as returned by the relay
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ForecastSeries {
    #[serde(rename = "list", default)]
    pub entries: Vec<ForecastEntry>,
    /// Every 8th entry, roughly one sample per day
    #[serde(default)]
    pub daily: Vec<ForecastEntry>,
    /// First 24 raw entries; 3-hour steps despite the name
    #[serde(default)]
    pub hourly: Vec<ForecastEntry>,
}

// Provider wire shapes. Only the fields read by the client are declared.

#[derive(Debug, Default, Deserialize)]
struct OwCondition {
    #[serde(default)]
    main: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Default, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct OwWind {
    speed: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct OwSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwObservation {
    #[serde(default)]
    name: String,
    coord: Coordinates,
    #[serde(default)]
    dt: i64,
    #[serde(default)]
    timezone: i32,
    main: OwMain,
    #[serde(default)]
    wind: OwWind,
    #[serde(default)]
    weather: Vec<OwCondition>,
    #[serde(default)]
    sys: OwSys,
    visibility: Option<f64>,
}

impl From<OwObservation> for Observation {
    fn from(raw: OwObservation) -> Self {
        let condition = raw.weather.into_iter().next().unwrap_or_default();
        Self {
            name: raw.name,
            country: raw.sys.country,
            coord: raw.coord,
            timestamp: raw.dt,
            utc_offset_seconds: raw.timezone,
            temperature: raw.main.temp,
            humidity: raw.main.humidity,
            wind_speed: raw.wind.speed,
            condition: condition.main,
            description: condition.description,
            visibility: raw.visibility,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwCondition>,
}

impl From<OwForecastEntry> for ForecastEntry {
    fn from(raw: OwForecastEntry) -> Self {
        let condition = raw.weather.into_iter().next().unwrap_or_default();
        Self {
            timestamp: raw.dt,
            temperature: raw.main.temp,
            condition: condition.main,
            description: condition.description,
        }
    }
}
