//! Unified error handling for the services.
//!
//! A single error type whose variants are the failure kinds callers can
//! observe. Each kind maps to a stable code, an HTTP status and a
//! user-facing message that never leaks storage or token internals.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::DomainError;
use thiserror::Error;

use crate::response::ServiceResult;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Registration
    #[error("Username already exists")]
    DuplicateUsername,

    #[error("Email already exists")]
    DuplicateEmail,

    // Authentication & Authorization
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Account is deactivated")]
    AccountDeactivated,

    #[error("Authentication required")]
    Unauthorized,

    // Resource errors
    #[error("{0}")]
    Conflict(String),

    // Validation
    #[error("{0}")]
    Validation(String),

    // Declared but deliberately unimplemented operations
    #[error("{0}")]
    NotImplemented(String),

    // Persistence write failed; carries the user-facing message
    #[error("{0}")]
    PersistenceFailure(String),

    // External service errors
    #[cfg(feature = "database")]
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[cfg(feature = "jwt")]
    #[error("Authentication error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[cfg(feature = "cache")]
    #[error("Cache error")]
    Cache(#[from] redis::RedisError),

    // Internal; carries detail for logs only
    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::DuplicateUsername => "DUPLICATE_USERNAME",
            AppError::DuplicateEmail => "DUPLICATE_EMAIL",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::AccountDeactivated => "ACCOUNT_DEACTIVATED",
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::NotImplemented(_) => "NOT_IMPLEMENTED",
            AppError::PersistenceFailure(_) => "PERSISTENCE_FAILURE",
            #[cfg(feature = "database")]
            AppError::Database(_) => "DATABASE_ERROR",
            #[cfg(feature = "jwt")]
            AppError::Jwt(_) => "AUTH_ERROR",
            #[cfg(feature = "cache")]
            AppError::Cache(_) => "CACHE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            #[cfg(feature = "jwt")]
            AppError::Jwt(_) => StatusCode::UNAUTHORIZED,
            AppError::AccountDeactivated => StatusCode::FORBIDDEN,
            AppError::DuplicateUsername | AppError::DuplicateEmail | AppError::Conflict(_) => {
                StatusCode::CONFLICT
            }
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            #[cfg(feature = "jwt")]
            AppError::Jwt(e) => {
                tracing::error!("JWT error: {:?}", e);
                "Invalid or expired token".to_string()
            }
            #[cfg(feature = "cache")]
            AppError::Cache(e) => {
                tracing::error!("Cache error: {:?}", e);
                "A cache error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            // Use default message for others
            _ => self.to_string(),
        }
    }
}

// =============================================================================
// HTTP Response (Axum)
// =============================================================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ServiceResult::<()>::failure(self.code(), self.user_message());

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::Validation(msg),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn not_implemented(msg: impl Into<String>) -> Self {
        AppError::NotImplemented(msg.into())
    }

    pub fn persistence(msg: impl Into<String>) -> Self {
        AppError::PersistenceFailure(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_messages_are_identical() {
        // Unknown user and wrong password share one kind, so one message
        assert_eq!(
            AppError::InvalidCredentials.user_message(),
            "Invalid username or password"
        );
        assert_ne!(
            AppError::AccountDeactivated.user_message(),
            AppError::InvalidCredentials.user_message()
        );
    }

    #[test]
    fn test_internal_detail_hidden() {
        let err = AppError::internal("connection refused to 10.0.0.3:5432");
        assert_eq!(err.user_message(), "An internal error occurred");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::DuplicateUsername.status(), StatusCode::CONFLICT);
        assert_eq!(AppError::DuplicateEmail.status(), StatusCode::CONFLICT);
        assert_eq!(AppError::AccountDeactivated.status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::validation("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::not_implemented("x").status(),
            StatusCode::NOT_IMPLEMENTED
        );
        assert_eq!(
            AppError::persistence("Failed to create user").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_domain_conversion() {
        let err: AppError = DomainError::validation("Name is required").into();
        assert!(matches!(err, AppError::Validation(ref m) if m == "Name is required"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
