//! In-process cache store

use super::CacheStore;
use crate::error::Result;
use crate::types::SyncEntity;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Cache store holding the list in memory.
///
/// Contents die with the process; suitable for tests and for hosts that opt
/// out of offline support but still want the engine's cache seam filled.
#[derive(Debug, Default)]
pub struct MemoryCacheStore<T> {
    items: RwLock<Vec<T>>,
}

impl<T> MemoryCacheStore<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl<T> CacheStore<T> for MemoryCacheStore<T>
where
    T: SyncEntity,
{
    async fn get_all(&self) -> Vec<T> {
        self.items.read().await.clone()
    }

    async fn replace_all(&self, items: &[T]) -> Result<()> {
        *self.items.write().await = items.to_vec();
        Ok(())
    }
}
