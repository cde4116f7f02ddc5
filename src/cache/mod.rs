//! Local cache stores
//!
//! A [`CacheStore`] holds the last fully-synced list so a screen can come up
//! offline. Reads are infallible by contract — a store that cannot read
//! reports an empty snapshot and logs, it never fails the caller. Writes
//! replace the whole collection; there is no partial update.
//!
//! The engine only ever *reads* the cache (first-page offline fallback).
//! Writing through after a successful refresh is the host application's job,
//! which keeps cache freshness policy out of the sync path.
//!
//! Shipped implementations:
//! - [`MemoryCacheStore`] — in-process, for tests and cache-less hosts
//! - [`SqliteCacheStore`] — SQLite-backed, survives restarts

use crate::error::Result;
use crate::types::SyncEntity;
use async_trait::async_trait;

mod memory;
mod sqlite;

pub use memory::MemoryCacheStore;
pub use sqlite::SqliteCacheStore;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

/// Local persistence for the last-known list of entities.
///
/// A store's lifetime is independent of any engine; several engines may
/// share one store. Writes are wholesale and idempotent, so concurrent
/// writers degrade to last-writer-wins.
#[async_trait]
pub trait CacheStore<T>: Send + Sync
where
    T: SyncEntity,
{
    /// Read the cached list, in its original order.
    ///
    /// Never fails: an empty list means nothing usable is cached.
    async fn get_all(&self) -> Vec<T>;

    /// Replace the cached list wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`](crate::error::CacheError) variants when the
    /// backend rejects the write; the previous contents are preserved in
    /// that case.
    async fn replace_all(&self, items: &[T]) -> Result<()>;
}
