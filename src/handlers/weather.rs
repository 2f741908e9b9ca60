//! Current-conditions endpoint handlers.

use crate::{
    models::{CityQuery, CoordinateQuery},
    services::WeatherRelay,
};
use actix_web::{Error, HttpRequest, HttpResponse, Result, web};
use paperclip::actix::api_v2_operation;

/// Shared relay from app data
pub(crate) fn relay_from(req: &HttpRequest) -> Result<web::Data<WeatherRelay>, Error> {
    req.app_data::<web::Data<WeatherRelay>>()
        .cloned()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("Weather relay is not configured"))
}

/// Current weather by city name
///
/// Returns the provider's observation payload unchanged.
#[api_v2_operation(
    summary = "Current Weather by City",
    description = "Returns the provider's current-conditions JSON for a city name (e.g., ?city=London).",
    tags("Weather"),
    responses(
        (status = 200, description = "Provider observation payload"),
        (status = 400, description = "Bad Request - Missing or empty city"),
        (status = 401, description = "Unauthorized - Provider rejected the server credential"),
        (status = 404, description = "Not Found - Unknown city"),
        (status = 500, description = "Internal Server Error - Provider unavailable")
    )
)]
pub async fn weather_by_city(
    req: HttpRequest,
    query: web::Query<CityQuery>,
) -> Result<HttpResponse, Error> {
    let relay = relay_from(&req)?;
    let city = query.city.as_deref().unwrap_or_default();

    let payload = relay.get_weather_by_city(city).await?;

    tracing::debug!(city = %city.trim(), "Returning current weather");
    Ok(HttpResponse::Ok().json(payload))
}

/// Current weather by coordinates
#[api_v2_operation(
    summary = "Current Weather by Coordinates",
    description = "Returns the provider's current-conditions JSON for a coordinate pair (e.g., ?lat=51.5&lon=-0.12).",
    tags("Weather"),
    responses(
        (status = 200, description = "Provider observation payload"),
        (status = 400, description = "Bad Request - Missing, non-numeric, or out-of-range coordinates"),
        (status = 401, description = "Unauthorized - Provider rejected the server credential"),
        (status = 500, description = "Internal Server Error - Provider unavailable")
    )
)]
pub async fn weather_by_coordinates(
    req: HttpRequest,
    query: web::Query<CoordinateQuery>,
) -> Result<HttpResponse, Error> {
    let relay = relay_from(&req)?;

    let payload = relay
        .get_weather_by_coordinates(query.lat.as_deref(), query.lon.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(payload))
}
