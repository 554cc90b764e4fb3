//! Mapping of domain errors onto HTTP responses

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::domain::DomainError;

/// Error codes for API responses
pub mod error_codes {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
    pub const CONFLICT: &str = "CONFLICT";
    pub const DATABASE_ERROR: &str = "DATABASE_ERROR";
    pub const MALFORMED_RESPONSE: &str = "MALFORMED_RESPONSE";
    pub const EXTERNAL_SERVICE_UNAVAILABLE: &str = "EXTERNAL_SERVICE_UNAVAILABLE";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

impl DomainError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DomainError::NotFound => StatusCode::NOT_FOUND,
            DomainError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            DomainError::Conflict(_) => StatusCode::CONFLICT,
            DomainError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
            DomainError::ExternalServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            DomainError::Database(_) | DomainError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            DomainError::NotFound => error_codes::NOT_FOUND,
            DomainError::InvalidArgument(_) => error_codes::INVALID_ARGUMENT,
            DomainError::Conflict(_) => error_codes::CONFLICT,
            DomainError::Database(_) => error_codes::DATABASE_ERROR,
            DomainError::MalformedResponse(_) => error_codes::MALFORMED_RESPONSE,
            DomainError::ExternalServiceUnavailable(_) => error_codes::EXTERNAL_SERVICE_UNAVAILABLE,
            DomainError::Internal(_) => error_codes::INTERNAL_ERROR,
        }
    }
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        (
            status,
            Json(json!({
                "error": self.to_string(),
                "code": self.code(),
            })),
        )
            .into_response()
    }
}
