//! # Persistence Adapter
//!
//! The explicit serialize/deserialize boundary between a store and durable
//! storage. A store calls [`Persistence::save`] after each transition and
//! [`Persistence::load`] once at startup; nothing is written implicitly.
//!
//! ## Stored Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  durable_storage                                                        │
//! │  ┌───────────────┬──────────────────────────────────────────────────┐  │
//! │  │ name          │ value                                            │  │
//! │  ├───────────────┼──────────────────────────────────────────────────┤  │
//! │  │ auth-storage  │ {"state":{"session":{...},"isAuthenticated":true},│  │
//! │  │               │  "version":0}                                    │  │
//! │  └───────────────┴──────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Versioning
//! The envelope's `version` is checked before the state is decoded. An entry
//! written by another format version is treated as absent, so a shape change
//! only needs a version bump, not a migration.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::DbResult;
use crate::storage::DurableStorage;

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    state: &'a T,
    version: u32,
}

#[derive(Deserialize)]
struct RawEnvelope {
    state: serde_json::Value,
    #[serde(default)]
    version: u32,
}

/// Persists one snapshot type under one namespace.
#[derive(Clone)]
pub struct Persistence {
    storage: Arc<dyn DurableStorage>,
    name: String,
    version: u32,
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence")
            .field("name", &self.name)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

impl Persistence {
    /// Creates an adapter writing `{ state, version }` under `name`.
    pub fn new(storage: Arc<dyn DurableStorage>, name: impl Into<String>, version: u32) -> Self {
        Persistence {
            storage,
            name: name.into(),
            version,
        }
    }

    /// The storage namespace.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Serializes `state` into the envelope and writes it.
    pub async fn save<T: Serialize + Sync>(&self, state: &T) -> DbResult<()> {
        let json = serde_json::to_string(&EnvelopeRef {
            state,
            version: self.version,
        })?;

        self.storage.set_item(&self.name, &json).await?;
        debug!(name = %self.name, "Snapshot persisted");
        Ok(())
    }

    /// Reads and decodes the snapshot.
    ///
    /// ## Returns
    /// * `Ok(Some(state))` - A snapshot of the current version exists
    /// * `Ok(None)` - Nothing stored, or stored under another version
    /// * `Err(DbError)` - Storage failed or the JSON is corrupt
    pub async fn load<T: DeserializeOwned>(&self) -> DbResult<Option<T>> {
        let Some(raw) = self.storage.get_item(&self.name).await? else {
            debug!(name = %self.name, "No persisted snapshot");
            return Ok(None);
        };

        let envelope: RawEnvelope = serde_json::from_str(&raw)?;
        if envelope.version != self.version {
            warn!(
                name = %self.name,
                found = envelope.version,
                expected = self.version,
                "Discarding snapshot written by another format version"
            );
            return Ok(None);
        }

        Ok(Some(serde_json::from_value(envelope.state)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::storage::MemoryStorage;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Counter {
        count: u32,
    }

    fn adapter(storage: Arc<MemoryStorage>, version: u32) -> Persistence {
        Persistence::new(storage, "counter", version)
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let storage = Arc::new(MemoryStorage::new());
        let persistence = adapter(storage.clone(), 0);

        persistence.save(&Counter { count: 3 }).await.unwrap();

        let raw = storage.get_item("counter").await.unwrap().unwrap();
        assert_eq!(raw, r#"{"state":{"count":3},"version":0}"#);

        let loaded: Option<Counter> = persistence.load().await.unwrap();
        assert_eq!(loaded, Some(Counter { count: 3 }));
    }

    #[tokio::test]
    async fn test_load_missing_is_none() {
        let persistence = adapter(Arc::new(MemoryStorage::new()), 0);
        let loaded: Option<Counter> = persistence.load().await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_other_version_is_discarded() {
        let storage = Arc::new(MemoryStorage::new());
        adapter(storage.clone(), 1)
            .save(&Counter { count: 9 })
            .await
            .unwrap();

        let loaded: Option<Counter> = adapter(storage, 0).load().await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_entry_is_an_error() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item("counter", "{not json").await.unwrap();

        let result: DbResult<Option<Counter>> = adapter(storage, 0).load().await;
        assert!(matches!(result, Err(DbError::Serialization(_))));
    }
}
