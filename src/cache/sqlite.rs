//! SQLite-backed cache store

use super::CacheStore;
use crate::error::{CacheError, Result};
use crate::types::SyncEntity;
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use sqlx::FromRow;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use std::marker::PhantomData;
use std::path::Path;

/// Cache store persisting entities as JSON rows in SQLite.
///
/// One store serves one named collection ("courses", "threads"); several
/// collections can share a database file through [`SqliteCacheStore::attach`].
/// Entities keep their list order across a restart.
pub struct SqliteCacheStore<T> {
    pool: SqlitePool,
    collection: String,
    _marker: PhantomData<fn() -> T>,
}

#[derive(Debug, FromRow)]
struct CachedRow {
    entity_id: String,
    payload: String,
}

impl<T> SqliteCacheStore<T>
where
    T: SyncEntity + Serialize + DeserializeOwned,
{
    /// Open (creating if missing) a cache database and bind one collection.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::OpenFailed`] when the database cannot be opened
    /// and [`CacheError::MigrationFailed`] when the schema cannot be created.
    pub async fn open(path: &Path, collection: &str) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePool::connect_with(options).await.map_err(|e| {
            CacheError::OpenFailed(format!("{}: {}", path.display(), e))
        })?;

        Self::attach(pool, collection).await
    }

    /// Bind a collection on an already-open pool.
    ///
    /// Runs the idempotent schema migration, so stores for different
    /// collections can be attached to the same pool in any order.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::MigrationFailed`] when the schema cannot be
    /// created.
    pub async fn attach(pool: SqlitePool, collection: &str) -> Result<Self> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS cached_entities (
                collection TEXT NOT NULL,
                entity_id TEXT NOT NULL,
                position INTEGER NOT NULL,
                payload TEXT NOT NULL,
                cached_at INTEGER NOT NULL,
                PRIMARY KEY (collection, entity_id)
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| CacheError::MigrationFailed(e.to_string()))?;

        Ok(Self {
            pool,
            collection: collection.to_string(),
            _marker: PhantomData,
        })
    }

    /// The underlying pool, for sharing with other collections.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn load_rows(&self) -> sqlx::Result<Vec<CachedRow>> {
        sqlx::query_as::<_, CachedRow>(
            r#"
            SELECT entity_id, payload
            FROM cached_entities
            WHERE collection = ?
            ORDER BY position ASC
            "#,
        )
        .bind(&self.collection)
        .fetch_all(&self.pool)
        .await
    }
}

#[async_trait]
impl<T> CacheStore<T> for SqliteCacheStore<T>
where
    T: SyncEntity + Serialize + DeserializeOwned,
{
    async fn get_all(&self) -> Vec<T> {
        let rows = match self.load_rows().await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(
                    collection = %self.collection,
                    error = %e,
                    "cache read failed, reporting empty snapshot"
                );
                return Vec::new();
            }
        };

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            match serde_json::from_str(&row.payload) {
                Ok(item) => items.push(item),
                Err(e) => {
                    // A single undecodable row (schema drift, partial write)
                    // must not take the whole snapshot down.
                    tracing::warn!(
                        collection = %self.collection,
                        entity_id = %row.entity_id,
                        error = %e,
                        "skipping undecodable cache row"
                    );
                }
            }
        }
        items
    }

    async fn replace_all(&self, items: &[T]) -> Result<()> {
        // Serialize everything up front so an encoding failure leaves the
        // previous contents untouched.
        let mut encoded = Vec::with_capacity(items.len());
        for item in items {
            let payload = serde_json::to_string(item).map_err(CacheError::Serialization)?;
            encoded.push((item.id().to_string(), payload));
        }

        let now = chrono::Utc::now().timestamp();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| CacheError::WriteFailed(format!("failed to begin transaction: {e}")))?;

        sqlx::query("DELETE FROM cached_entities WHERE collection = ?")
            .bind(&self.collection)
            .execute(&mut *tx)
            .await
            .map_err(|e| CacheError::WriteFailed(format!("failed to clear collection: {e}")))?;

        for (position, (entity_id, payload)) in encoded.into_iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO cached_entities (collection, entity_id, position, payload, cached_at)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(&self.collection)
            .bind(&entity_id)
            .bind(position as i64)
            .bind(&payload)
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                CacheError::WriteFailed(format!("failed to insert entity {entity_id}: {e}"))
            })?;
        }

        tx.commit()
            .await
            .map_err(|e| CacheError::WriteFailed(format!("failed to commit: {e}")))?;

        tracing::debug!(
            collection = %self.collection,
            count = items.len(),
            "cache collection replaced"
        );
        Ok(())
    }
}
