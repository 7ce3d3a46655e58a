//! # Repository Module
//!
//! Database repository implementations for GameVault.
//!
//! ## Available Repositories
//!
//! - [`storage::StorageRepository`] - Namespaced key/value entries
//!   (`durable_storage` table), the SQLite [`crate::DurableStorage`]

pub mod storage;
