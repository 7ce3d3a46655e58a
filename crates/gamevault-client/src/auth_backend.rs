//! # Auth Backend
//!
//! The collaborator the AuthStore sends credentials to, and the in-process
//! mock used until a real identity service exists.
//!
//! ## Mock Request Flow
//! ```text
//! login / register
//!      │
//!      ▼
//! tokio::time::sleep(delay)        ← simulated network latency
//!      │
//!      ▼
//! lock registry ─► verify / register ─► unlock   (no await while held)
//!      │
//!      ▼
//! Ok(Session) | Err(AuthError)
//! ```

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use gamevault_core::error::AuthResult;
use gamevault_core::{AuthError, CredentialRegistry, Session, DEFAULT_AUTH_DELAY_MS};
use tracing::{debug, info};

/// Checks credentials and creates accounts.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> AuthResult<Session>;

    /// Creates an account and returns the session for it.
    ///
    /// The password is accepted but not stored by the mock.
    async fn register(&self, username: &str, email: &str, password: &str) -> AuthResult<Session>;
}

/// In-memory backend over a [`CredentialRegistry`] with artificial latency.
#[derive(Debug)]
pub struct MockAuthBackend {
    registry: Mutex<CredentialRegistry>,
    delay: Duration,
}

impl Default for MockAuthBackend {
    fn default() -> Self {
        MockAuthBackend::new(Duration::from_millis(DEFAULT_AUTH_DELAY_MS))
    }
}

impl MockAuthBackend {
    /// Creates a backend seeded with the demo user.
    pub fn new(delay: Duration) -> Self {
        MockAuthBackend::with_registry(CredentialRegistry::seeded(), delay)
    }

    pub fn with_registry(registry: CredentialRegistry, delay: Duration) -> Self {
        MockAuthBackend {
            registry: Mutex::new(registry),
            delay,
        }
    }

    /// Number of known users.
    pub fn user_count(&self) -> AuthResult<usize> {
        self.locked(|r| r.len())
    }

    fn locked<F, R>(&self, f: F) -> AuthResult<R>
    where
        F: FnOnce(&mut CredentialRegistry) -> R,
    {
        let mut registry = self
            .registry
            .lock()
            .map_err(|_| AuthError::Unavailable("credential registry lock poisoned".into()))?;
        Ok(f(&mut registry))
    }

    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl AuthBackend for MockAuthBackend {
    async fn login(&self, email: &str, password: &str) -> AuthResult<Session> {
        self.simulate_latency().await;

        let session = self.locked(|r| r.verify(email, password))??;
        info!(email = %email, user_id = %session.id, "Login accepted");
        Ok(session)
    }

    async fn register(&self, username: &str, email: &str, _password: &str) -> AuthResult<Session> {
        self.simulate_latency().await;

        let session = self.locked(|r| r.register(username, email))??;
        debug!(user_id = %session.id, "Registry grew by one");
        info!(email = %email, "Account registered");
        Ok(session)
    }
}
