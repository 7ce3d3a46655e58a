//! # Auth Commands
//!
//! Login, register, logout and profile, as the view layer invokes them.
//!
//! Form validation runs here, before the store is touched, so a rejected
//! form never shows up in the store's `error` field.

use gamevault_core::validation::{validate_login, validate_registration};
use gamevault_core::{AuthState, RequestStatus, Session};
use serde::Serialize;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::state::AuthStore;

/// What the view layer sees of the auth store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub session: Option<Session>,
    pub is_authenticated: bool,
    pub status: RequestStatus,
}

impl From<&AuthState> for AuthResponse {
    fn from(state: &AuthState) -> Self {
        AuthResponse {
            session: state.session().cloned(),
            is_authenticated: state.is_authenticated(),
            status: state.status(),
        }
    }
}

impl std::fmt::Display for AuthResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.session {
            Some(session) => write!(f, "Signed in as {} <{}>", session.username, session.email),
            None => write!(f, "Signed out"),
        }
    }
}

/// The signed-in user, as the profile page shows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Profile(pub Session);

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let session = &self.0;
        write!(f, "{}\n{}\nid: {}", session.username, session.email, session.id)
    }
}

/// Signs in.
///
/// Surrounding whitespace is trimmed from the email here; the store matches
/// the trimmed value exactly, so `" Demo@example.com"` still fails.
///
/// ## Errors
/// - Validation errors for an empty email or password
/// - [`AppError::Auth`] when the backend rejects the credentials; the store
///   holds the same message in its `error` field
pub async fn login(auth: &AuthStore, email: &str, password: &str) -> AppResult<AuthResponse> {
    debug!("login command");
    validate_login(email, password)?;

    auth.login(email.trim(), password).await?;
    Ok(AuthResponse::from(&auth.state()))
}

/// Creates an account and signs in with it.
///
/// The username is trimmed before it reaches the store. An email containing
/// whitespace is rejected by validation, so the store matches the address
/// exactly as typed, and [`login`] with the same address finds it.
pub async fn register(
    auth: &AuthStore,
    username: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> AppResult<AuthResponse> {
    debug!("register command");
    validate_registration(username, email, password, confirm_password)?;

    auth.register(username.trim(), email.trim(), password).await?;
    Ok(AuthResponse::from(&auth.state()))
}

pub async fn logout(auth: &AuthStore) -> AuthResponse {
    debug!("logout command");
    auth.logout().await;
    AuthResponse::from(&auth.state())
}

/// The signed-in user. Refuses to answer without a session.
pub fn profile(auth: &AuthStore) -> AppResult<Profile> {
    auth.session().map(Profile).ok_or(AppError::NotAuthenticated)
}
