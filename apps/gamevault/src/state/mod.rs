//! # State Module
//!
//! The two stores the view layer reads from and sends actions to.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      App::start                                 │   │
//! │  │  builds each store once and hands clones to commands           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                     │                          │                        │
//! │                     ▼                          ▼                        │
//! │  ┌─────────────────────────────┐  ┌─────────────────────────────┐      │
//! │  │        AuthStore            │  │       CatalogStore          │      │
//! │  │                             │  │                             │      │
//! │  │  watch<AuthState>           │  │  watch<CatalogState>        │      │
//! │  │  dyn AuthBackend            │  │  dyn CatalogSource          │      │
//! │  │  Persistence (optional)     │  │  OverlapPolicy              │      │
//! │  └─────────────────────────────┘  └─────────────────────────────┘      │
//! │                                                                         │
//! │  The stores never reference each other.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod auth;
mod catalog;

pub use auth::AuthStore;
pub use catalog::{CatalogStore, FetchOutcome};
