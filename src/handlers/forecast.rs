//! Forecast endpoint handlers.

use crate::{
    handlers::weather::relay_from,
    models::{CityQuery, CoordinateQuery},
};
use actix_web::{Error, HttpRequest, HttpResponse, Result, web};
use paperclip::actix::api_v2_operation;

/// Forecast by coordinates
///
/// The provider's 3-hour series plus `daily` (every 8th entry) and
/// `hourly` (the first 24 entries).
#[api_v2_operation(
    summary = "Forecast by Coordinates",
    description = "Returns the provider's forecast series for a coordinate pair, with derived 'daily' and 'hourly' fields.",
    tags("Forecast"),
    responses(
        (status = 200, description = "Forecast series with daily and hourly fields"),
        (status = 400, description = "Bad Request - Missing, non-numeric, or out-of-range coordinates"),
        (status = 401, description = "Unauthorized - Provider rejected the server credential"),
        (status = 404, description = "Not Found - No forecast for the location"),
        (status = 500, description = "Internal Server Error - Provider unavailable")
    )
)]
pub async fn forecast_by_coordinates(
    req: HttpRequest,
    query: web::Query<CoordinateQuery>,
) -> Result<HttpResponse, Error> {
    let relay = relay_from(&req)?;

    let payload = relay
        .get_forecast(query.lat.as_deref(), query.lon.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(payload))
}

/// Forecast by city name
#[api_v2_operation(
    summary = "Forecast by City",
    description = "Returns the provider's forecast series for a city name, with derived 'daily' and 'hourly' fields.",
    tags("Forecast"),
    responses(
        (status = 200, description = "Forecast series with daily and hourly fields"),
        (status = 400, description = "Bad Request - Missing or empty city"),
        (status = 401, description = "Unauthorized - Provider rejected the server credential"),
        (status = 404, description = "Not Found - Unknown city"),
        (status = 500, description = "Internal Server Error - Provider unavailable")
    )
)]
pub async fn forecast_by_city(
    req: HttpRequest,
    query: web::Query<CityQuery>,
) -> Result<HttpResponse, Error> {
    let relay = relay_from(&req)?;

    let payload = relay
        .get_forecast_by_city(query.city.as_deref().unwrap_or_default())
        .await?;

    Ok(HttpResponse::Ok().json(payload))
}
