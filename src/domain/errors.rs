//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.
//! The api layer maps each variant onto an HTTP status.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Resource not found
    #[error("Resource not found")]
    NotFound,
    /// Caller supplied an argument outside the accepted range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// Uniqueness rule violated
    #[error("Conflict: {0}")]
    Conflict(String),
    /// Database/persistence error
    #[error("Database error: {0}")]
    Database(String),
    /// External API answered with a body we cannot interpret
    #[error("Malformed response from external service: {0}")]
    MalformedResponse(String),
    /// Network failure, timeout or non-2xx status from the external API
    #[error("External service unavailable: {0}")]
    ExternalServiceUnavailable(String),
    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

// Conversion from SeaORM errors (used in infrastructure layer)
impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        match e.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) => {
                DomainError::Conflict(detail)
            }
            _ => DomainError::Database(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::MalformedResponse(e.to_string())
    }
}

impl From<reqwest::Error> for DomainError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            DomainError::ExternalServiceUnavailable(format!("request timed out: {}", e))
        } else {
            DomainError::ExternalServiceUnavailable(e.to_string())
        }
    }
}
