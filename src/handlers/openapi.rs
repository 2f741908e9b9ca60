//! OpenAPI specification generation and app factory.

use crate::{
    config::MetricsConfig,
    error::RelayError,
    handlers::{
        forecast_by_city, forecast_by_coordinates, get_metrics, health, method_not_allowed,
        route_not_found, weather_by_city, weather_by_coordinates,
    },
    middleware::{MetricsMiddleware, RequestIdMiddleware},
    services::{AppMetrics, WeatherRelay},
};
use actix_web::{App, http::StatusCode, middleware::ErrorHandlers};
use paperclip::actix::{OpenApiExt, web};
use paperclip::v2::models::{DefaultApiRaw, Info};

/// Path serving the generated OpenAPI document
pub const SPEC_PATH: &str = "/api/spec/v2";

/// Every route the relay serves, as (method, path)
pub const ROUTES: &[(&str, &str)] = &[
    ("GET", "/weather"),
    ("GET", "/weather/geo"),
    ("GET", "/forecast"),
    ("GET", "/forecast/city"),
    ("GET", "/health"),
    ("GET", "/metrics"),
    ("GET", SPEC_PATH),
];

/// Routes formatted as "METHOD /path" for the 404 body
pub fn available_routes() -> Vec<String> {
    ROUTES
        .iter()
        .map(|(method, path)| format!("{method} {path}"))
        .collect()
}

/// Creates the OpenAPI specification for the relay
pub fn create_openapi_spec() -> DefaultApiRaw {
    DefaultApiRaw {
        info: Info {
            title: "Weather Relay".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            description: Some(
                "Relays current-weather and forecast lookups to the weather provider.\n\n\
                The provider API key is held by the server and never exposed to callers. \
                Provider payloads are returned unchanged, except that forecasts gain two \
                derived fields:\n\
                - `daily`: every 8th entry of the 3-hour series (about one per day)\n\
                - `hourly`: the first 24 entries (about 72 hours, in 3-hour steps)\n\
                \n\
                **Errors** use the body `{\"error\": \"<kind>\", \"message\": \"<text>\"}`:\n\
                - 400 `bad_request`: missing or invalid parameters\n\
                - 404 `not_found`: the provider has no data for the location\n\
                - 401 `unauthorized`: the provider rejected the server credential\n\
                - 500 `upstream_error`: any other provider or network failure".into(),
            ),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Creates the relay application
///
/// Wires the relay and metrics into app data, registers every route with
/// request-ID and metrics middleware, and answers unmatched routes (unknown
/// path or wrong method) with a 404 listing the valid ones. Malformed query
/// strings get the relay's JSON error body. Used by the server binary and
/// by tests.
pub fn create_app(
    relay: WeatherRelay,
    metrics: AppMetrics,
    metrics_config: MetricsConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let query_config = actix_web::web::QueryConfig::default()
        .error_handler(|err, _req| RelayError::BadRequest(err.to_string()).into());

    App::new()
        .wrap(ErrorHandlers::new().handler(StatusCode::METHOD_NOT_ALLOWED, method_not_allowed))
        .wrap(RequestIdMiddleware)
        .wrap(MetricsMiddleware)
        .wrap_api_with_spec(create_openapi_spec())
        .app_data(web::Data::new(relay))
        .app_data(web::Data::new(metrics))
        .app_data(web::Data::new(metrics_config))
        .app_data(query_config)
        .service(web::resource("/weather").route(web::get().to(weather_by_city)))
        .service(web::resource("/weather/geo").route(web::get().to(weather_by_coordinates)))
        .service(web::resource("/forecast").route(web::get().to(forecast_by_coordinates)))
        .service(web::resource("/forecast/city").route(web::get().to(forecast_by_city)))
        .service(web::resource("/health").route(web::get().to(health)))
        .service(web::resource("/metrics").route(web::get().to(get_metrics)))
        .with_json_spec_at(SPEC_PATH)
        .build()
        .default_service(actix_web::web::to(route_not_found))
}
