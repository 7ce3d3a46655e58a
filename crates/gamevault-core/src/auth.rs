//! # Auth State
//!
//! Pure state and transitions behind the AuthStore, plus the mock credential
//! registry the simulated backend consults.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Auth Transitions                                 │
//! │                                                                         │
//! │   begin_request()          authenticated(session)                      │
//! │   loading=true             session=Some, authenticated=true            │
//! │   error=None               loading=false                               │
//! │        │                          ▲                                     │
//! │        ▼                          │ match                               │
//! │   ┌─────────┐   (await)   ┌───────┴───────┐                            │
//! │   │ Loading │────────────►│   Registry    │                            │
//! │   └─────────┘             └───────┬───────┘                            │
//! │                                   │ mismatch / duplicate                │
//! │                                   ▼                                     │
//! │                           failed(err)                                   │
//! │                           error=Some(msg), loading=false               │
//! │                           session untouched                             │
//! │                                                                         │
//! │   logout()      → session=None, authenticated=false (error kept)       │
//! │   clear_error() → error=None                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persistence
//! Only `session` and `is_authenticated` survive a restart. They travel as an
//! [`AuthSnapshot`]; `is_loading` and `error` always come back at their
//! defaults.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{AuthError, AuthResult};
use crate::types::{RequestStatus, Session};
use crate::DEMO_PASSWORD;

// =============================================================================
// Auth State
// =============================================================================

/// Everything the AuthStore owns.
///
/// ## Invariants
/// - `is_authenticated == session.is_some()`
/// - `is_loading` and `error.is_some()` are never both true
///
/// Fields are private so that only the transitions below can break or keep
/// those invariants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    session: Option<Session>,
    is_authenticated: bool,
    is_loading: bool,
    error: Option<String>,
}

impl AuthState {
    /// Restores state from a persisted snapshot.
    ///
    /// The authenticated flag is re-derived from the session so a hand-edited
    /// or truncated snapshot cannot produce `authenticated` without a user.
    pub fn from_snapshot(snapshot: AuthSnapshot) -> Self {
        let is_authenticated = snapshot.session.is_some();
        AuthState {
            session: snapshot.session,
            is_authenticated,
            is_loading: false,
            error: None,
        }
    }

    /// Returns the persisted slice of this state.
    pub fn snapshot(&self) -> AuthSnapshot {
        AuthSnapshot {
            session: self.session.clone(),
            is_authenticated: self.is_authenticated,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn status(&self) -> RequestStatus {
        RequestStatus::from_flags(self.is_loading, self.error())
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Marks a login/register attempt as started and drops any stale error.
    pub fn begin_request(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    /// Settles an attempt successfully.
    pub fn authenticated(&mut self, session: Session) {
        self.session = Some(session);
        self.is_authenticated = true;
        self.is_loading = false;
    }

    /// Settles an attempt with a failure. The current session is untouched.
    pub fn failed(&mut self, err: &AuthError) {
        self.error = Some(err.to_string());
        self.is_loading = false;
    }

    /// Ends the session. A pending error stays visible.
    pub fn logout(&mut self) {
        self.session = None;
        self.is_authenticated = false;
    }

    /// Clears the error. Returns false when there was nothing to clear.
    pub fn clear_error(&mut self) -> bool {
        self.error.take().is_some()
    }
}

// =============================================================================
// Auth Snapshot
// =============================================================================

/// The persisted slice of [`AuthState`].
///
/// ## Serialized Form
/// ```json
/// { "session": { "id": "1", "username": "demo", "email": "demo@example.com" },
///   "isAuthenticated": true }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AuthSnapshot {
    #[serde(default)]
    pub session: Option<Session>,

    #[serde(default)]
    pub is_authenticated: bool,
}

// =============================================================================
// Credential Registry
// =============================================================================

/// The mock user database.
///
/// Ordered, unique by email, never persisted. Only registration mutates it;
/// a fresh process starts again from [`CredentialRegistry::seeded`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialRegistry {
    users: Vec<Session>,
}

impl CredentialRegistry {
    /// Creates a registry with the given users.
    pub fn new(users: Vec<Session>) -> Self {
        CredentialRegistry { users }
    }

    /// Creates the registry every process starts with: the demo user.
    pub fn seeded() -> Self {
        CredentialRegistry::new(vec![Session::new("1", "demo", "demo@example.com")])
    }

    /// Looks a user up by exact email.
    pub fn find_by_email(&self, email: &str) -> Option<&Session> {
        self.users.iter().find(|u| u.email == email)
    }

    /// Checks a login attempt.
    ///
    /// Every known user shares the single accepted secret [`DEMO_PASSWORD`].
    pub fn verify(&self, email: &str, password: &str) -> AuthResult<Session> {
        match self.find_by_email(email) {
            Some(user) if password == DEMO_PASSWORD => Ok(user.clone()),
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    /// Adds a user and returns its session.
    ///
    /// ## Errors
    /// - [`AuthError::UserExists`] if the email is already registered; the
    ///   registry is left unchanged
    pub fn register(&mut self, username: &str, email: &str) -> AuthResult<Session> {
        if self.find_by_email(email).is_some() {
            return Err(AuthError::UserExists);
        }

        let session = Session::new(self.next_id(), username, email);
        self.users.push(session.clone());
        Ok(session)
    }

    /// Number of known users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn next_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().simple().to_string();
            if self.users.iter().all(|u| u.id != id) {
                return id;
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn demo() -> Session {
        Session::new("1", "demo", "demo@example.com")
    }

    #[test]
    fn test_default_state_is_unauthenticated() {
        let state = AuthState::default();
        assert!(!state.is_authenticated());
        assert!(state.session().is_none());
        assert!(!state.is_loading());
        assert!(state.error().is_none());
        assert_eq!(state.status(), RequestStatus::Idle);
    }

    #[test]
    fn test_begin_request_clears_previous_error() {
        let mut state = AuthState::default();
        state.failed(&AuthError::InvalidCredentials);
        assert_eq!(state.error(), Some("Invalid email or password"));

        state.begin_request();
        assert!(state.is_loading());
        assert!(state.error().is_none());
        assert_eq!(state.status(), RequestStatus::Loading);
    }

    #[test]
    fn test_failed_keeps_existing_session() {
        let mut state = AuthState::default();
        state.begin_request();
        state.authenticated(demo());

        state.begin_request();
        state.failed(&AuthError::UserExists);

        assert!(state.is_authenticated());
        assert_eq!(state.session(), Some(&demo()));
        assert_eq!(state.error(), Some("User already exists"));
        assert!(!state.is_loading());
    }

    #[test]
    fn test_logout_keeps_error() {
        let mut state = AuthState::default();
        state.authenticated(demo());
        state.failed(&AuthError::InvalidCredentials);

        state.logout();

        assert!(!state.is_authenticated());
        assert!(state.session().is_none());
        assert_eq!(state.error(), Some("Invalid email or password"));
    }

    #[test]
    fn test_clear_error_is_idempotent() {
        let mut state = AuthState::default();
        let before = state.clone();

        assert!(!state.clear_error());
        assert_eq!(state, before);

        state.failed(&AuthError::InvalidCredentials);
        assert!(state.clear_error());
        assert!(state.error().is_none());
    }

    #[test]
    fn test_snapshot_roundtrip_resets_transient_fields() {
        let mut state = AuthState::default();
        state.authenticated(demo());
        state.begin_request(); // loading in flight when the snapshot is taken

        let json = serde_json::to_string(&state.snapshot()).unwrap();
        let restored = AuthState::from_snapshot(serde_json::from_str(&json).unwrap());

        assert!(restored.is_authenticated());
        assert_eq!(restored.session(), Some(&demo()));
        assert!(!restored.is_loading());
        assert!(restored.error().is_none());
    }

    #[test]
    fn test_from_snapshot_rederives_authenticated_flag() {
        let snapshot = AuthSnapshot {
            session: None,
            is_authenticated: true,
        };
        assert!(!AuthState::from_snapshot(snapshot).is_authenticated());
    }

    #[test]
    fn test_registry_verify() {
        let registry = CredentialRegistry::seeded();

        let session = registry.verify("demo@example.com", "password").unwrap();
        assert_eq!(session.username, "demo");

        assert_eq!(
            registry.verify("demo@example.com", "wrong"),
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            registry.verify("nobody@example.com", "password"),
            Err(AuthError::InvalidCredentials)
        );
        // Exact match only
        assert!(registry.verify("DEMO@example.com", "password").is_err());
    }

    #[test]
    fn test_registry_register() {
        let mut registry = CredentialRegistry::seeded();

        let session = registry.register("alice", "alice@example.com").unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(session.username, "alice");
        assert_ne!(session.id, "1");
        assert_eq!(registry.find_by_email("alice@example.com"), Some(&session));

        // Newly registered users log in with the shared secret
        assert!(registry.verify("alice@example.com", "password").is_ok());
    }

    #[test]
    fn test_registry_rejects_duplicate_email() {
        let mut registry = CredentialRegistry::seeded();

        assert_eq!(
            registry.register("impostor", "demo@example.com"),
            Err(AuthError::UserExists)
        );
        assert_eq!(registry.len(), 1);
    }
}
