//! # Durable Storage Seam
//!
//! The key/value contract persistence is written against, and an in-memory
//! implementation of it.
//!
//! ```text
//!                   ┌──────────────────────────┐
//!   Persistence ───►│  dyn DurableStorage      │
//!                   └────────────┬─────────────┘
//!                  ┌─────────────┴─────────────┐
//!                  ▼                           ▼
//!        StorageRepository             MemoryStorage
//!        (SQLite row per name)         (HashMap, tests / --ephemeral)
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{DbError, DbResult};

/// Namespaced string entries that outlive the process (or pretend to).
#[async_trait]
pub trait DurableStorage: Send + Sync {
    /// Reads the entry stored under `name`.
    async fn get_item(&self, name: &str) -> DbResult<Option<String>>;

    /// Writes `value` under `name`, replacing any previous value.
    async fn set_item(&self, name: &str, value: &str) -> DbResult<()>;
}

/// Process-local storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> DbResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| DbError::Internal("memory storage lock poisoned".to_string()))
    }
}

#[async_trait]
impl DurableStorage for MemoryStorage {
    async fn get_item(&self, name: &str) -> DbResult<Option<String>> {
        Ok(self.entries()?.get(name).cloned())
    }

    async fn set_item(&self, name: &str, value: &str) -> DbResult<()> {
        self.entries()?.insert(name.to_string(), value.to_string());
        Ok(())
    }
}
