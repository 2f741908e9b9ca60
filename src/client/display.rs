//! Presentation values derived from the latest observation and forecast.
//!
//! Everything here is a pure function of its inputs; nothing is cached
//! between queries.

use crate::models::{ForecastEntry, ForecastSeries, Observation};
use chrono::{DateTime, FixedOffset, Local};
use serde::Serialize;

/// Background animation shown for the current conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationCategory {
    Clear,
    Rain,
    Snow,
    Storm,
    Cloud,
}

impl AnimationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimationCategory::Clear => "clear",
            AnimationCategory::Rain => "rain",
            AnimationCategory::Snow => "snow",
            AnimationCategory::Storm => "storm",
            AnimationCategory::Cloud => "cloud",
        }
    }
}

/// Keyword rules in priority order; the first rule with a keyword found in
/// the condition label or description decides the category.
const CONDITION_RULES: &[(&[&str], AnimationCategory)] = &[
    (&["rain"], AnimationCategory::Rain),
    (&["snow"], AnimationCategory::Snow),
    (&["thunderstorm", "storm"], AnimationCategory::Storm),
    (&["cloud"], AnimationCategory::Cloud),
    (&["clear", "sunny"], AnimationCategory::Clear),
];

pub const COLD_SUGGESTION: &str = "It's cold out there. Wear a warm coat, a hat, and gloves.";
pub const MODERATE_SUGGESTION: &str = "Mild weather. A light jacket or sweater should do.";
pub const HOT_SUGGESTION: &str = "It's hot. Wear light clothing and stay hydrated.";

/// Category for a condition label/description pair
///
/// Falls back to temperature when no keyword matches: below 0 °C is snow,
/// above 25 °C is clear, anything else is cloud.
pub fn category_for(label: &str, description: &str, temperature: f64) -> AnimationCategory {
    let label = label.to_lowercase();
    let description = description.to_lowercase();

    CONDITION_RULES
        .iter()
        .find(|(keywords, _)| {
            keywords
                .iter()
                .any(|k| label.contains(k) || description.contains(k))
        })
        .map(|(_, category)| *category)
        .unwrap_or(if temperature < 0.0 {
            AnimationCategory::Snow
        } else if temperature > 25.0 {
            AnimationCategory::Clear
        } else {
            AnimationCategory::Cloud
        })
}

pub fn derive_animation_category(observation: &Observation) -> AnimationCategory {
    category_for(
        &observation.condition,
        &observation.description,
        observation.temperature,
    )
}

/// Clothing suggestion bucketed by temperature; 5 and 25 are moderate
pub fn suggestion_for(temperature: f64) -> &'static str {
    if temperature < 5.0 {
        COLD_SUGGESTION
    } else if temperature <= 25.0 {
        MODERATE_SUGGESTION
    } else {
        HOT_SUGGESTION
    }
}

pub fn derive_suggestion(observation: &Observation) -> &'static str {
    suggestion_for(observation.temperature)
}

/// Offset of the machine running the client
pub fn viewer_offset() -> FixedOffset {
    *Local::now().offset()
}

/// Wall-clock time at the observed location, rendered in the viewer's zone
///
/// The timestamp is shifted by the location's offset and back by the
/// viewer's, so formatting in the viewer's zone shows the location's time.
pub fn derive_local_time(observation: &Observation, viewer: FixedOffset) -> String {
    let shifted = observation.timestamp + i64::from(observation.utc_offset_seconds)
        - i64::from(viewer.local_minus_utc());

    DateTime::from_timestamp(shifted, 0)
        .map(|t| {
            t.with_timezone(&viewer)
                .format("%A, %B %-d, %Y, %-I:%M %p")
                .to_string()
        })
        .unwrap_or_else(|| "Unknown time".to_string())
}

/// One row of the daily forecast strip
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastDay {
    pub label: String,
    pub temperature: f64,
    pub description: String,
    pub animation: AnimationCategory,
}

/// Everything the view renders for one query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayState {
    pub location: String,
    pub local_time: String,
    pub temperature: f64,
    pub description: String,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub visibility: Option<f64>,
    pub animation: AnimationCategory,
    pub suggestion: &'static str,
    pub daily: Vec<ForecastDay>,
}

fn forecast_day(entry: &ForecastEntry, utc_offset_seconds: i32) -> ForecastDay {
    let label = FixedOffset::east_opt(utc_offset_seconds)
        .zip(DateTime::from_timestamp(entry.timestamp, 0))
        .map(|(offset, t)| t.with_timezone(&offset).format("%a %b %-d").to_string())
        .unwrap_or_default();

    ForecastDay {
        label,
        temperature: entry.temperature,
        description: entry.description.clone(),
        animation: category_for(&entry.condition, &entry.description, entry.temperature),
    }
}

/// Derive the full view from the latest observation and forecast
pub fn derive_display_state(
    observation: &Observation,
    forecast: Option<&ForecastSeries>,
    viewer: FixedOffset,
) -> DisplayState {
    let daily = forecast
        .map(|f| {
            f.daily
                .iter()
                .map(|e| forecast_day(e, observation.utc_offset_seconds))
                .collect()
        })
        .unwrap_or_default();

    DisplayState {
        location: observation.location(),
        local_time: derive_local_time(observation, viewer),
        temperature: observation.temperature,
        description: observation.description.clone(),
        humidity: observation.humidity,
        wind_speed: observation.wind_speed,
        visibility: observation.visibility,
        animation: derive_animation_category(observation),
        suggestion: derive_suggestion(observation),
        daily,
    }
}
