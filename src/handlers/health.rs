//! Health check endpoint handler.

use crate::{
    models::HealthResponse,
    services::{AppMetrics, WeatherRelay},
};
use actix_web::{Error, HttpRequest, Result, web};
use paperclip::actix::api_v2_operation;

/// Health check endpoint
///
/// Reports uptime and whether the upstream credential is configured. Never
/// calls the provider.
#[api_v2_operation(
    summary = "Health Check Endpoint",
    description = "Returns the relay status, uptime in seconds, and whether an upstream API key is configured.",
    tags("Health"),
    responses(
        (status = 200, description = "Successful response", body = HealthResponse)
    )
)]
pub async fn health(req: HttpRequest) -> Result<web::Json<HealthResponse>, Error> {
    let uptime_seconds = req
        .app_data::<web::Data<AppMetrics>>()
        .map(|m| m.uptime().as_secs_f64())
        .unwrap_or_default();

    let api_key_configured = req
        .app_data::<web::Data<WeatherRelay>>()
        .is_some_and(|relay| relay.api_key_configured());

    Ok(web::Json(HealthResponse {
        status: "healthy".to_string(),
        uptime_seconds,
        api_key_configured,
    }))
}
