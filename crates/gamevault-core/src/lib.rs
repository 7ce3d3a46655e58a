//! # gamevault-core: Pure State Logic for GameVault
//!
//! This crate is the **heart** of GameVault. It holds the domain types and the
//! state transitions of the two stores as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        GameVault Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 View Layer (CLI / browser)                      │   │
//! │  │    Home ──► Game Detail ──► Login ──► Register ──► Profile      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ reads state, invokes actions           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              Stores (apps/gamevault/src/state)                  │   │
//! │  │         AuthStore (persisted)      CatalogStore                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ pure transitions                       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ gamevault-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   auth    │  │  catalog  │  │ fallback  │  │   │
//! │  │   │  Session  │  │ AuthState │  │ Catalog-  │  │ seed list │  │   │
//! │  │   │ CatalogIt │  │ Registry  │  │  State    │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • NO TIMERS                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Session, CatalogItem, request status
//! - [`auth`] - Auth state, snapshot and the mock credential registry
//! - [`catalog`] - Catalog state, generation tokens, derived filtering
//! - [`fallback`] - Embedded seed catalog used when the source is unreachable
//! - [`validation`] - Registration form rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use gamevault_core::auth::{AuthState, CredentialRegistry};
//! use gamevault_core::DEMO_PASSWORD;
//!
//! let registry = CredentialRegistry::seeded();
//! let mut state = AuthState::default();
//!
//! state.begin_request();
//! let session = registry.verify("demo@example.com", DEMO_PASSWORD).unwrap();
//! state.authenticated(session);
//!
//! assert!(state.is_authenticated());
//! assert_eq!(state.session().unwrap().username, "demo");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod auth;
pub mod catalog;
pub mod error;
pub mod fallback;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use auth::{AuthSnapshot, AuthState, CredentialRegistry};
pub use catalog::{CatalogFilter, CatalogState, Generation, OverlapPolicy};
pub use error::{AuthError, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Durable-storage key the auth snapshot is persisted under.
pub const AUTH_STORAGE_NAMESPACE: &str = "auth-storage";

/// Format version written next to the persisted auth snapshot.
///
/// Snapshots carrying any other version are discarded on rehydration.
pub const AUTH_SNAPSHOT_VERSION: u32 = 0;

/// The single secret the mock backend accepts for every known user.
pub const DEMO_PASSWORD: &str = "password";

/// Default number of catalog items requested per fetch.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Default artificial latency of the mock auth backend, in milliseconds.
pub const DEFAULT_AUTH_DELAY_MS: u64 = 1000;
