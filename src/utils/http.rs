//! Request metadata helpers used in request logs.

use actix_web::HttpRequest;

/// Client address, preferring the first hop of proxy headers
pub fn extract_client_ip(req: &HttpRequest) -> String {
    ["X-Forwarded-For", "X-Real-IP"]
        .iter()
        .filter_map(|name| req.headers().get(*name))
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(',').next())
        .map(str::trim)
        .find(|ip| !ip.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| {
            req.connection_info()
                .peer_addr()
                .unwrap_or("unknown")
                .to_string()
        })
}

pub fn extract_user_agent(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("User-Agent")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
}
