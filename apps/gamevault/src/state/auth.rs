//! # Auth Store
//!
//! Owns the session and the login/register request status, and persists
//! the authenticated slice across restarts.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Auth Store Operations                                │
//! │                                                                         │
//! │  View Action          Store Method         State Change                 │
//! │  ───────────          ────────────         ────────────                 │
//! │                                                                         │
//! │  Submit login ──────► login() ───────────► loading ─► session | error   │
//! │                                                                         │
//! │  Submit register ───► register() ────────► loading ─► session | error   │
//! │                                                                         │
//! │  Click logout ──────► logout() ──────────► session cleared              │
//! │                                                                         │
//! │  Dismiss banner ────► clear_error() ─────► error cleared                │
//! │                                                                         │
//! │  Process start ─────► rehydrate() ───────► session restored             │
//! │                                                                         │
//! │  Every transition is one `send_modify` on the watch channel, applied    │
//! │  before the method's first await. The snapshot is then written through  │
//! │  the Persistence adapter, one write at a time, always the latest state. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use gamevault_client::AuthBackend;
use gamevault_core::error::AuthResult;
use gamevault_core::{AuthSnapshot, AuthState, Session};
use gamevault_db::Persistence;
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

/// Handle to the authentication store. Clones share the same state.
#[derive(Clone)]
pub struct AuthStore {
    inner: Arc<AuthInner>,
}

struct AuthInner {
    state: watch::Sender<AuthState>,
    backend: Arc<dyn AuthBackend>,
    persistence: Option<Persistence>,
    /// Held across each snapshot write, so writes land in transition order.
    write_lock: Mutex<()>,
}

impl AuthStore {
    /// Creates a store with default state.
    ///
    /// Pass `None` for `persistence` to keep the session in memory only.
    pub fn new(backend: Arc<dyn AuthBackend>, persistence: Option<Persistence>) -> Self {
        Self::with_state(AuthState::default(), backend, persistence)
    }

    /// Creates a store and restores the persisted session, if any.
    ///
    /// A missing, corrupt or other-version snapshot leaves the store
    /// unauthenticated; none of those abort startup.
    pub async fn rehydrate(
        backend: Arc<dyn AuthBackend>,
        persistence: Option<Persistence>,
    ) -> Self {
        let state = match &persistence {
            Some(p) => match p.load::<AuthSnapshot>().await {
                Ok(Some(snapshot)) => {
                    debug!(authenticated = snapshot.is_authenticated, "Auth snapshot restored");
                    AuthState::from_snapshot(snapshot)
                }
                Ok(None) => AuthState::default(),
                Err(e) => {
                    warn!(namespace = p.name(), error = %e, "Ignoring unreadable auth snapshot");
                    AuthState::default()
                }
            },
            None => AuthState::default(),
        };

        Self::with_state(state, backend, persistence)
    }

    fn with_state(
        state: AuthState,
        backend: Arc<dyn AuthBackend>,
        persistence: Option<Persistence>,
    ) -> Self {
        let (state, _) = watch::channel(state);
        AuthStore {
            inner: Arc::new(AuthInner {
                state,
                backend,
                persistence,
                write_lock: Mutex::new(()),
            }),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Current state.
    pub fn state(&self) -> AuthState {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified after every transition.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.inner.state.subscribe()
    }

    pub fn session(&self) -> Option<Session> {
        self.inner.state.borrow().session().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated()
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Signs in with email and password.
    ///
    /// The outcome is also recorded in state: the session on success, the
    /// error message on failure (the current session is left as it was).
    pub async fn login(&self, email: &str, password: &str) -> AuthResult<Session> {
        self.inner.state.send_modify(AuthState::begin_request);
        debug!(email = %email, "Login started");

        let result = self.inner.backend.login(email, password).await;
        self.settle(&result).await;
        result
    }

    /// Creates an account and signs in with it.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> AuthResult<Session> {
        self.inner.state.send_modify(AuthState::begin_request);
        debug!(email = %email, "Registration started");

        let result = self.inner.backend.register(username, email, password).await;
        self.settle(&result).await;
        result
    }

    /// Ends the session. Any displayed error stays.
    ///
    /// State changes on the first poll; the rest of the future is the
    /// snapshot write.
    pub async fn logout(&self) {
        self.inner.state.send_modify(AuthState::logout);
        info!("Logged out");
        self.persist().await;
    }

    /// Clears the error. Returns false, and notifies nobody, when there
    /// was none.
    pub fn clear_error(&self) -> bool {
        self.inner.state.send_if_modified(AuthState::clear_error)
    }

    async fn settle(&self, result: &AuthResult<Session>) {
        match result {
            Ok(session) => {
                let session = session.clone();
                self.inner.state.send_modify(|s| s.authenticated(session));
                self.persist().await;
            }
            Err(err) => {
                debug!(error = %err, "Auth request rejected");
                self.inner.state.send_modify(|s| s.failed(err));
            }
        }
    }

    async fn persist(&self) {
        let Some(persistence) = &self.inner.persistence else {
            return;
        };

        // Snapshot under the lock so a queued write carries the newest state.
        let _guard = self.inner.write_lock.lock().await;
        let snapshot = self.inner.state.borrow().snapshot();
        if let Err(e) = persistence.save(&snapshot).await {
            warn!(namespace = persistence.name(), error = %e, "Failed to persist auth snapshot");
        }
    }
}

impl std::fmt::Debug for AuthStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthStore")
            .field("state", &*self.inner.state.borrow())
            .field("persistence", &self.inner.persistence)
            .finish_non_exhaustive()
    }
}
