//! Error Types for the Linker API
//!
//! Every failure leaves the service as a JSON body
//! `{ "code", "message", "details"? }` with the HTTP status implied by the
//! code. Driver errors are logged in full and replaced by a generic message
//! before they reach the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use linker_core::{CatalogError, RecordKind};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// ERROR CODE ENUM
// ============================================================================

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ========================================================================
    // Validation Errors (400)
    // ========================================================================
    /// Request contains invalid input data
    InvalidInput,

    /// Field format is incorrect
    InvalidFormat,

    // ========================================================================
    // Not Found Errors (404)
    // ========================================================================
    /// No row matched the identifying fields
    RecordNotFound,

    // ========================================================================
    // Conflict Errors (409)
    // ========================================================================
    /// A row with the same unique key already exists
    RecordAlreadyExists,

    /// A foreign key would be left dangling
    ReferenceViolation,

    // ========================================================================
    // Server Errors (500, 503)
    // ========================================================================
    /// Internal server error
    InternalError,

    /// Database operation failed
    DatabaseError,

    /// Service is temporarily unavailable
    ServiceUnavailable,

    /// Database connection pool exhausted
    ConnectionPoolExhausted,
}

impl ErrorCode {
    /// Get the HTTP status code for this error code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::InvalidInput | ErrorCode::InvalidFormat => StatusCode::BAD_REQUEST,

            ErrorCode::RecordNotFound => StatusCode::NOT_FOUND,

            ErrorCode::RecordAlreadyExists | ErrorCode::ReferenceViolation => {
                StatusCode::CONFLICT
            }

            ErrorCode::ServiceUnavailable | ErrorCode::ConnectionPoolExhausted => {
                StatusCode::SERVICE_UNAVAILABLE
            }

            ErrorCode::InternalError | ErrorCode::DatabaseError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get a default message for this error code.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::InvalidInput => "Invalid input data",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RecordNotFound => "Record not found",
            ErrorCode::RecordAlreadyExists => "Record already exists",
            ErrorCode::ReferenceViolation => "Operation would break a reference",
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database operation failed",
            ErrorCode::ServiceUnavailable => "Service temporarily unavailable",
            ErrorCode::ConnectionPoolExhausted => "Connection pool exhausted",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ============================================================================
// API ERROR STRUCT
// ============================================================================

/// Structured error response for API operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ApiError {
    /// Error code categorizing the error
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,

    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Create a new API error with the given code, using the default message.
    pub fn from_code(code: ErrorCode) -> Self {
        Self {
            code,
            message: code.default_message().to_string(),
            details: None,
        }
    }

    /// Add additional details to the error.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        self.code.status_code()
    }

    // ========================================================================
    // Convenience constructors
    // ========================================================================

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    pub fn invalid_format(field: &str, expected: &str) -> Self {
        Self::new(
            ErrorCode::InvalidFormat,
            format!("Field '{}' has invalid format, expected {}", field, expected),
        )
    }

    /// No `kind` row matched `id`.
    pub fn record_not_found(kind: RecordKind, id: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::RecordNotFound,
            format!("{} with id {} not found", kind, id),
        )
        .with_details(serde_json::json!({ "resource": kind.table(), "id": id.to_string() }))
    }

    pub fn record_already_exists(kind: RecordKind) -> Self {
        Self::new(
            ErrorCode::RecordAlreadyExists,
            format!("{} already exists", kind),
        )
        .with_details(serde_json::json!({ "resource": kind.table() }))
    }

    pub fn reference_violation(kind: RecordKind) -> Self {
        Self::new(
            ErrorCode::ReferenceViolation,
            format!("{} is referenced by, or refers to, a missing row", kind),
        )
        .with_details(serde_json::json!({ "resource": kind.table() }))
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    pub fn database_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    pub fn connection_pool_exhausted() -> Self {
        Self::from_code(ErrorCode::ConnectionPoolExhausted)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// ============================================================================
// AXUM INTEGRATION
// ============================================================================

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self);
        (status, body).into_response()
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

/// Convert a storage failure into a client-safe error.
///
/// The storage reason string may carry driver text, so it is logged and
/// dropped.
impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::AlreadyExists { kind, reason } => {
                tracing::warn!(resource = kind.table(), %reason, "Unique constraint rejected write");
                ApiError::record_already_exists(kind)
            }
            CatalogError::ReferenceViolation { kind, reason } => {
                tracing::warn!(resource = kind.table(), %reason, "Foreign key rejected write");
                ApiError::reference_violation(kind)
            }
            CatalogError::PoolExhausted => ApiError::connection_pool_exhausted(),
            CatalogError::Unavailable { reason } => {
                tracing::error!(%reason, "Catalog storage unavailable");
                ApiError::service_unavailable("Database is unavailable")
            }
            CatalogError::LockPoisoned => {
                tracing::error!("Catalog lock poisoned");
                ApiError::internal_error("Internal server error")
            }
            CatalogError::Storage { reason } => {
                tracing::error!(%reason, "Database error");
                ApiError::database_error("Database operation failed")
            }
        }
    }
}

// ============================================================================
// RESULT TYPE ALIAS
// ============================================================================

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_status_mapping() {
        assert_eq!(ErrorCode::InvalidInput.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::InvalidFormat.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::RecordNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::RecordAlreadyExists.status_code(), StatusCode::CONFLICT);
        assert_eq!(ErrorCode::ReferenceViolation.status_code(), StatusCode::CONFLICT);
        assert_eq!(ErrorCode::DatabaseError.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            ErrorCode::ConnectionPoolExhausted.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_catalog_errors_are_redacted() {
        let err = ApiError::from(CatalogError::Storage {
            reason: "syntax error at or near \"SELEC\"".to_string(),
        });
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("SELEC"));

        let err = ApiError::from(CatalogError::ReferenceViolation {
            kind: RecordKind::Entity,
            reason: "violates foreign key constraint \"link_entity_id_fkey\"".to_string(),
        });
        assert_eq!(err.code, ErrorCode::ReferenceViolation);
        assert!(!err.message.contains("fkey"));
    }

    #[test]
    fn test_not_found_names_resource() {
        let err = ApiError::record_not_found(RecordKind::Property, "123");
        assert_eq!(err.code, ErrorCode::RecordNotFound);
        assert!(err.message.contains("Property"));
        assert!(err.message.contains("123"));
        assert_eq!(
            err.details,
            Some(serde_json::json!({ "resource": "property", "id": "123" }))
        );
    }

    #[test]
    fn test_error_serialization() -> Result<(), serde_json::Error> {
        let err = ApiError::from(CatalogError::PoolExhausted);
        let json = serde_json::to_string(&err)?;

        assert!(json.contains("CONNECTION_POOL_EXHAUSTED"));
        assert!(!json.contains("details"));

        let deserialized: ApiError = serde_json::from_str(&json)?;
        assert_eq!(deserialized, err);
        Ok(())
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::database_error("Connection failed");
        let display = format!("{}", err);

        assert!(display.contains("DatabaseError"));
        assert!(display.contains("Connection failed"));
    }
}
