//! # Storage Repository
//!
//! SQLite-backed [`DurableStorage`]: one row per namespace in the
//! `durable_storage` table.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  set_item("auth-storage", json)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  INSERT INTO durable_storage (name, value, updated_at)                 │
//! │  ON CONFLICT(name) DO UPDATE  ← upsert, single statement               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Row replaced atomically; readers see old or new, never partial        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use crate::storage::DurableStorage;

/// Repository for namespaced key/value entries.
#[derive(Debug, Clone)]
pub struct StorageRepository {
    pool: SqlitePool,
}

impl StorageRepository {
    /// Creates a new StorageRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StorageRepository { pool }
    }
}

#[async_trait]
impl DurableStorage for StorageRepository {
    async fn get_item(&self, name: &str) -> DbResult<Option<String>> {
        let value =
            sqlx::query_scalar::<_, String>("SELECT value FROM durable_storage WHERE name = ?1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;

        Ok(value)
    }

    async fn set_item(&self, name: &str, value: &str) -> DbResult<()> {
        debug!(name = %name, bytes = value.len(), "Writing storage entry");

        sqlx::query(
            r#"
            INSERT INTO durable_storage (name, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(name) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(name)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    #[tokio::test]
    async fn test_upsert_and_read_back() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.storage();

        assert_eq!(repo.get_item("auth-storage").await.unwrap(), None);

        repo.set_item("auth-storage", r#"{"v":1}"#).await.unwrap();
        repo.set_item("auth-storage", r#"{"v":2}"#).await.unwrap();

        assert_eq!(
            repo.get_item("auth-storage").await.unwrap().as_deref(),
            Some(r#"{"v":2}"#)
        );

        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM durable_storage")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }
}
