//! # Application Errors
//!
//! [`AppError`] is what the composition root propagates with `?`;
//! [`ApiError`] is what the view layer renders.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in GameVault                              │
//! │                                                                         │
//! │  ConfigError ─┐                                                         │
//! │  DbError ─────┤                                                         │
//! │  ClientError ─┼──► AppError ──► ApiError { code, message } ──► CLI     │
//! │  AuthError ───┤                      │                                  │
//! │  Validation ──┘                      └─► exit code 1                    │
//! │                                                                         │
//! │  Store-level failures (bad login, unreachable catalog) are NOT here:   │
//! │  they settle into the store's `error` field and the command still      │
//! │  renders state.                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialized Form
//! ```json
//! { "code": "UNAUTHENTICATED", "message": "Sign in to view your profile" }
//! ```

use gamevault_client::ClientError;
use gamevault_core::{AuthError, ValidationError};
use gamevault_db::DbError;
use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Everything that can abort a command.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Database(#[from] DbError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A command that needs a session ran without one.
    #[error("Sign in to view your profile")]
    NotAuthenticated,

    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

// =============================================================================
// API Error
// =============================================================================

/// Error surface for the view layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Credentials rejected or account already exists
    AuthFailed,

    /// No session where one is required (401)
    Unauthenticated,

    /// Catalog source unreachable or answered with an error
    CatalogUnavailable,

    /// Durable storage failed (500)
    DatabaseError,

    /// Configuration could not be loaded
    ConfigError,

    /// Internal error (500)
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Config(e) => ApiError::new(ErrorCode::ConfigError, e.to_string()),
            AppError::Database(e) => e.into(),
            AppError::Client(e) => e.into(),
            AppError::Auth(e) => ApiError::new(ErrorCode::AuthFailed, e.to_string()),
            AppError::Validation(e) => ApiError::validation(e.to_string()),
            AppError::NotAuthenticated => ApiError::new(
                ErrorCode::Unauthenticated,
                AppError::NotAuthenticated.to_string(),
            ),
            AppError::Output(e) => ApiError::internal(e.to_string()),
        }
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            other => {
                // Log the actual error but return a generic message
                tracing::error!("Storage operation failed: {}", other);
                ApiError::new(ErrorCode::DatabaseError, "Storage operation failed")
            }
        }
    }
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Status { status: 404 } => {
                ApiError::new(ErrorCode::NotFound, "Game not found")
            }
            other => ApiError::new(ErrorCode::CatalogUnavailable, other.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_serialization() {
        let err = ApiError::from(AppError::NotAuthenticated);
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(
            json,
            r#"{"code":"UNAUTHENTICATED","message":"Sign in to view your profile"}"#
        );
    }

    #[test]
    fn test_auth_error_keeps_its_message() {
        let err = ApiError::from(AppError::from(AuthError::UserExists));
        assert_eq!(err.code, ErrorCode::AuthFailed);
        assert_eq!(err.message, "User already exists");
    }

    #[test]
    fn test_missing_game_is_not_found() {
        let err = ApiError::from(AppError::from(ClientError::Status { status: 404 }));
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = ApiError::from(AppError::from(ClientError::Status { status: 502 }));
        assert_eq!(err.code, ErrorCode::CatalogUnavailable);
        assert_eq!(err.message, "Failed to fetch games (HTTP 502)");
    }

    #[test]
    fn test_validation_error() {
        let err = ApiError::from(AppError::from(ValidationError::PasswordMismatch));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Passwords do not match");
    }

    #[test]
    fn test_display() {
        let err = ApiError::from(AppError::from(ClientError::Status { status: 404 }));
        assert_eq!(err.to_string(), "[NotFound] Game not found");
    }
}
