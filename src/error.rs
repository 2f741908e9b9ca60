//! Error taxonomy for the relay service.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};

/// Errors a relay operation can produce
///
/// Each variant maps to exactly one HTTP status code. All of them are
/// terminal for the triggering request; nothing is retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RelayError {
    /// Malformed or missing input, correctable by the caller
    #[error("{0}")]
    BadRequest(String),

    /// Valid input for which the provider has no data
    #[error("{0}")]
    NotFound(String),

    /// The provider rejected the server-held credential
    #[error("Weather provider rejected the API key")]
    Unauthorized,

    /// Network failure or any other unsuccessful provider response
    #[error("{0}")]
    Upstream(String),
}

impl RelayError {
    /// Short machine-readable kind used in error bodies and logs
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::BadRequest(_) => "bad_request",
            RelayError::NotFound(_) => "not_found",
            RelayError::Unauthorized => "unauthorized",
            RelayError::Upstream(_) => "upstream_error",
        }
    }
}

/// JSON body returned for every relay error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

impl ResponseError for RelayError {
    fn status_code(&self) -> StatusCode {
        match self {
            RelayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            RelayError::NotFound(_) => StatusCode::NOT_FOUND,
            RelayError::Unauthorized => StatusCode::UNAUTHORIZED,
            RelayError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.kind().to_string(),
            message: self.to_string(),
        })
    }
}

/// Startup configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("OPENWEATHER_API_KEY environment variable is required")]
    MissingApiKey,

    #[error("Invalid upstream base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Failed to create HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
