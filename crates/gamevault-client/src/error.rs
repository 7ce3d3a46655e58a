//! # Client Error Types
//!
//! Failures of outbound calls to the catalog source.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Client Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Response            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidUrl     │  │  Transport      │  │  Status (non-2xx)       │ │
//! │  │                 │  │  Timeout        │  │  Decode                 │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant ends up as the CatalogStore's advisory error text, so the
//! messages are written for a person reading the catalog page.

use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Everything that can go wrong talking to the catalog source.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configured base URL could not be parsed or extended.
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    /// The request never produced a response (DNS, refused, reset, TLS).
    #[error("Failed to reach the game catalog: {0}")]
    Transport(String),

    /// The request exceeded the configured timeout.
    #[error("Game catalog request timed out after {0} seconds")]
    Timeout(u64),

    /// The source answered with a non-success status.
    #[error("Failed to fetch games (HTTP {status})")]
    Status { status: u16 },

    /// The body was not the expected JSON shape.
    #[error("Unexpected game catalog response: {0}")]
    Decode(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            ClientError::Status {
                status: status.as_u16(),
            }
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message() {
        let err = ClientError::Status { status: 503 };
        assert_eq!(err.to_string(), "Failed to fetch games (HTTP 503)");
    }

    #[test]
    fn test_transport_message() {
        let err = ClientError::Transport("connection refused".into());
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_from_url_parse_error() {
        let err: ClientError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }
}
