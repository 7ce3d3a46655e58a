//! # Error Types
//!
//! Domain-specific error types for gamevault-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  gamevault-core errors (this file)                                     │
//! │  ├── AuthError        - Login / register failures                      │
//! │  └── ValidationError  - Form input failures                            │
//! │                                                                         │
//! │  gamevault-db errors (separate crate)                                  │
//! │  └── DbError          - Durable storage failures                       │
//! │                                                                         │
//! │  gamevault-client errors (separate crate)                              │
//! │  └── ClientError      - Catalog source failures                        │
//! │                                                                         │
//! │  App errors (apps/gamevault)                                           │
//! │  └── AppError/ApiError - What the view layer sees                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Store Error Surface
//! The stores keep the `Display` text of these errors in their `error`
//! field, so the messages below are part of the contract with the view
//! layer. `AuthError::InvalidCredentials` must render exactly as
//! `"Invalid email or password"`.

use thiserror::Error;

// =============================================================================
// Auth Error
// =============================================================================

/// Failures of the login and register operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Unknown email, or the password did not match.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Registration with an email the registry already knows.
    #[error("User already exists")]
    UserExists,

    /// The backend could not answer at all.
    ///
    /// ## When This Occurs
    /// - A real backend replaced the mock and its transport failed
    /// - The backend's internal state became unusable
    #[error("{0}")]
    Unavailable(String),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when form input doesn't meet requirements.
/// Used before an action is invoked on a store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., email without `@`).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Password confirmation differs from the password.
    #[error("Passwords do not match")]
    PasswordMismatch,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with AuthError.
pub type AuthResult<T> = Result<T, AuthError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_messages() {
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Invalid email or password"
        );
        assert_eq!(AuthError::UserExists.to_string(), "User already exists");
        assert_eq!(
            AuthError::Unavailable("backend offline".into()).to_string(),
            "backend offline"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "username".to_string(),
        };
        assert_eq!(err.to_string(), "username is required");
        assert_eq!(
            ValidationError::PasswordMismatch.to_string(),
            "Passwords do not match"
        );
    }
}
