//! # Validation Module
//!
//! Input validation for the login and register forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: View (form)                                                  │
//! │  └── THIS MODULE: required fields, email shape, password confirmation  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Store action (login / register)                              │
//! │  └── Registry rules: known email, accepted secret, unique email        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A form that fails here never reaches the store, so these failures do not
//! appear in the store's `error` field.
//!
//! ## Usage
//! ```rust
//! use gamevault_core::validation::validate_registration;
//!
//! assert!(validate_registration("alice", "alice@example.com", "pw", "pw").is_ok());
//! assert!(validate_registration("alice", "alice@example.com", "pw", "px").is_err());
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_USERNAME_LEN: usize = 50;
const MAX_EMAIL_LEN: usize = 254;

// =============================================================================
// Field Validators
// =============================================================================

fn required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a display name.
pub fn validate_username(username: &str) -> ValidationResult<()> {
    required("username", username)?;

    if username.trim().chars().count() > MAX_USERNAME_LEN {
        return Err(ValidationError::TooLong {
            field: "username".to_string(),
            max: MAX_USERNAME_LEN,
        });
    }

    Ok(())
}

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - Exactly one `@` with text on both sides
/// - Domain contains a dot
/// - No whitespace
pub fn validate_email(email: &str) -> ValidationResult<()> {
    required("email", email)?;

    if email.len() > MAX_EMAIL_LEN {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: MAX_EMAIL_LEN,
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| invalid("must contain '@'"))?;

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(invalid("must look like name@domain"));
    }

    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid("domain must contain a dot"));
    }

    Ok(())
}

// =============================================================================
// Form Validators
// =============================================================================

/// Validates the login form.
pub fn validate_login(email: &str, password: &str) -> ValidationResult<()> {
    required("email", email)?;
    required("password", password)
}

/// Validates the register form, including the password confirmation.
pub fn validate_registration(
    username: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> ValidationResult<()> {
    validate_username(username)?;
    validate_email(email)?;
    required("password", password)?;

    if password != confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("demo@example.com").is_ok());
        assert!(validate_email("first.last@sub.example.org").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("demo").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("demo@localhost").is_err());
        assert!(validate_email("demo@@example.com").is_err());
        assert!(validate_email("de mo@example.com").is_err());
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("demo").is_ok());
        assert!(validate_username("   ").is_err());
        assert!(validate_username(&"x".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_login_requires_both_fields() {
        assert!(validate_login("demo@example.com", "password").is_ok());
        assert_eq!(
            validate_login("demo@example.com", ""),
            Err(ValidationError::Required {
                field: "password".to_string()
            })
        );
    }

    #[test]
    fn test_registration_password_mismatch() {
        assert_eq!(
            validate_registration("alice", "alice@example.com", "secret", "secreT"),
            Err(ValidationError::PasswordMismatch)
        );
    }
}
