//! # gamevault-db: Durable Storage for GameVault
//!
//! This crate provides the storage the AuthStore persists its session into.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        GameVault Persistence Flow                       │
//! │                                                                         │
//! │  AuthStore transition (login / register / logout)                      │
//! │       │                                                                 │
//! │       ▼ snapshot()                                                      │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   gamevault-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │  Persistence  │    │ DurableStorage │    │  Database    │  │   │
//! │  │   │ (persist.rs)  │───►│ (storage.rs)   │───►│  (pool.rs)   │  │   │
//! │  │   │               │    │                │    │              │  │   │
//! │  │   │ {state,       │    │ StorageRepo    │    │ SqlitePool   │  │   │
//! │  │   │  version}     │    │ MemoryStorage  │    │ Migrations   │  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ~/.local/share/gamevault/gamevault.db  (Linux)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use gamevault_db::{Database, DbConfig, Persistence};
//!
//! let db = Database::new(DbConfig::new("gamevault.db")).await?;
//! let persistence = Persistence::new(Arc::new(db.storage()), "auth-storage", 0);
//!
//! persistence.save(&snapshot).await?;
//! let restored: Option<AuthSnapshot> = persistence.load().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod persist;
pub mod pool;
pub mod repository;
pub mod storage;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use persist::Persistence;
pub use pool::{Database, DbConfig};
pub use repository::storage::StorageRepository;
pub use storage::{DurableStorage, MemoryStorage};
