//! Route pattern extraction for metric labels.

use actix_web::HttpRequest;

/// Label used for requests that matched no registered resource
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// Registered resource pattern for the request
///
/// Unmatched paths collapse into a single label so arbitrary URLs cannot
/// grow the metric cardinality.
pub fn extract_route_pattern(req: &HttpRequest) -> String {
    req.match_pattern()
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string())
}
