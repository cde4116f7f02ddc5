use crate::cache::{CacheStore, MemoryCacheStore, SqliteCacheStore};
use crate::types::SyncEntity;
use serde::{Deserialize, Serialize};
use tempfile::tempdir;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Thread {
    id: String,
    title: String,
}

impl SyncEntity for Thread {
    type Id = String;
    fn id(&self) -> String {
        self.id.clone()
    }
}

fn thread(id: &str) -> Thread {
    Thread {
        id: id.to_string(),
        title: format!("Thread {id}"),
    }
}

// --- MemoryCacheStore ---

#[tokio::test]
async fn memory_store_starts_empty_and_round_trips() {
    let store = MemoryCacheStore::new();
    assert!(store.get_all().await.is_empty());

    store
        .replace_all(&[thread("t1"), thread("t2")])
        .await
        .unwrap();
    assert_eq!(store.get_all().await, vec![thread("t1"), thread("t2")]);
}

#[tokio::test]
async fn memory_store_replace_is_wholesale() {
    let store = MemoryCacheStore::new();
    store
        .replace_all(&[thread("t1"), thread("t2")])
        .await
        .unwrap();

    store.replace_all(&[thread("t3")]).await.unwrap();
    assert_eq!(
        store.get_all().await,
        vec![thread("t3")],
        "old entries must not survive a replace"
    );
}

// --- SqliteCacheStore ---

#[tokio::test]
async fn sqlite_store_round_trips_in_order() {
    let dir = tempdir().unwrap();
    let store = SqliteCacheStore::open(&dir.path().join("cache.db"), "threads")
        .await
        .unwrap();

    let items = vec![thread("t3"), thread("t1"), thread("t2")];
    store.replace_all(&items).await.unwrap();

    assert_eq!(
        store.get_all().await,
        items,
        "list order must survive the round trip, not entity-id order"
    );
}

#[tokio::test]
async fn sqlite_store_empty_on_fresh_database() {
    let dir = tempdir().unwrap();
    let store: SqliteCacheStore<Thread> =
        SqliteCacheStore::open(&dir.path().join("cache.db"), "threads")
            .await
            .unwrap();
    assert!(store.get_all().await.is_empty());
}

#[tokio::test]
async fn sqlite_store_replace_removes_stale_entries() {
    let dir = tempdir().unwrap();
    let store = SqliteCacheStore::open(&dir.path().join("cache.db"), "threads")
        .await
        .unwrap();

    store
        .replace_all(&[thread("t1"), thread("t2"), thread("t3")])
        .await
        .unwrap();
    store.replace_all(&[thread("t2")]).await.unwrap();

    assert_eq!(store.get_all().await, vec![thread("t2")]);
}

#[tokio::test]
async fn sqlite_store_persists_across_reopen() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("cache.db");

    {
        let store = SqliteCacheStore::open(&db_path, "threads").await.unwrap();
        store
            .replace_all(&[thread("t1"), thread("t2")])
            .await
            .unwrap();
        store.pool().close().await;
    }

    let reopened: SqliteCacheStore<Thread> =
        SqliteCacheStore::open(&db_path, "threads").await.unwrap();
    assert_eq!(
        reopened.get_all().await,
        vec![thread("t1"), thread("t2")],
        "cache contents must survive a restart"
    );
}

#[tokio::test]
async fn sqlite_collections_are_isolated() {
    let dir = tempdir().unwrap();
    let threads = SqliteCacheStore::open(&dir.path().join("cache.db"), "threads")
        .await
        .unwrap();
    let courses: SqliteCacheStore<Thread> =
        SqliteCacheStore::attach(threads.pool().clone(), "courses")
            .await
            .unwrap();

    threads.replace_all(&[thread("t1")]).await.unwrap();
    courses.replace_all(&[thread("c1")]).await.unwrap();

    assert_eq!(threads.get_all().await, vec![thread("t1")]);
    assert_eq!(courses.get_all().await, vec![thread("c1")]);

    threads.replace_all(&[]).await.unwrap();
    assert!(threads.get_all().await.is_empty());
    assert_eq!(
        courses.get_all().await,
        vec![thread("c1")],
        "clearing one collection must not touch another"
    );
}

#[tokio::test]
async fn sqlite_store_skips_undecodable_rows() {
    let dir = tempdir().unwrap();
    let store = SqliteCacheStore::open(&dir.path().join("cache.db"), "threads")
        .await
        .unwrap();
    store
        .replace_all(&[thread("t1"), thread("t2")])
        .await
        .unwrap();

    // Corrupt one row behind the store's back.
    sqlx::query("UPDATE cached_entities SET payload = 'not json' WHERE entity_id = 't1'")
        .execute(store.pool())
        .await
        .unwrap();

    assert_eq!(
        store.get_all().await,
        vec![thread("t2")],
        "a corrupt row degrades to a smaller snapshot, never a failure"
    );
}
