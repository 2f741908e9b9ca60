//! Fallback responses for unmatched routes.
//!
//! A route is a (method, path) pair, so a known path requested with the
//! wrong method is unmatched too and gets the same 404.

use crate::{handlers::openapi::available_routes, models::RouteNotFoundResponse};
use actix_web::{
    HttpRequest, HttpResponse, Result,
    dev::ServiceResponse,
    middleware::ErrorHandlerResponse,
};

fn not_found_response(req: &HttpRequest) -> HttpResponse {
    tracing::debug!(method = %req.method(), path = %req.path(), "No route matched");

    HttpResponse::NotFound().json(RouteNotFoundResponse {
        error: "not_found".to_string(),
        message: format!("Route {} {} not found", req.method(), req.path()),
        available_routes: available_routes(),
    })
}

/// Responds 404 with the list of valid routes
pub async fn route_not_found(req: HttpRequest) -> HttpResponse {
    not_found_response(&req)
}

/// Replaces actix's empty 405 for a known path with the route-list 404
pub fn method_not_allowed<B>(res: ServiceResponse<B>) -> Result<ErrorHandlerResponse<B>> {
    let (req, _) = res.into_parts();
    let response = not_found_response(&req);

    Ok(ErrorHandlerResponse::Response(
        ServiceResponse::new(req, response).map_into_right_body(),
    ))
}
