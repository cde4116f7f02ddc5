//! # listsync
//!
//! Offline-aware paginated list synchronization for client applications.
//!
//! ## Design Philosophy
//!
//! listsync is designed to be:
//! - **Cache-first** - previously synced data is shown when the network is
//!   unavailable; stale data beats a blank screen
//! - **Library-first** - no CLI or UI, purely a Rust crate for embedding
//! - **Event-driven** - consumers observe published snapshots and domain
//!   change events, no polling required
//! - **Swappable at the seams** - remote source, cache store, and
//!   connectivity probe are traits; bring your own backends
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use listsync::{
//!     AlwaysOnline, HttpRemoteSource, HttpSourceConfig, SqliteCacheStore, SyncConfig,
//!     SyncEngine, SyncEntity,
//! };
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Clone, Serialize, Deserialize)]
//! struct Course {
//!     id: String,
//!     name: String,
//! }
//!
//! impl SyncEntity for Course {
//!     type Id = String;
//!     fn id(&self) -> String {
//!         self.id.clone()
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = HttpRemoteSource::new(HttpSourceConfig::new(
//!         "https://api.example.com/v1/courses",
//!     ))?;
//!     let cache = SqliteCacheStore::open(Path::new("cache.db"), "courses").await?;
//!
//!     let engine = Arc::new(SyncEngine::<Course>::new(
//!         Arc::new(source),
//!         Arc::new(cache),
//!         Arc::new(AlwaysOnline),
//!         SyncConfig::named("courses"),
//!     ));
//!
//!     // Observe state snapshots
//!     let mut snapshots = engine.subscribe();
//!     tokio::spawn(async move {
//!         while snapshots.changed().await.is_ok() {
//!             let snapshot = snapshots.borrow().clone();
//!             println!("state: {:?}", snapshot.can_load_more);
//!         }
//!     });
//!
//!     engine.refresh().await;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Local cache stores
pub mod cache;
/// Configuration types
pub mod config;
/// Connectivity probing
pub mod connectivity;
/// Sync policy engine (decomposed into focused submodules)
pub mod engine;
/// Error types
pub mod error;
/// Domain-change broadcast bus
pub mod notifier;
/// Remote page sources
pub mod source;
/// Core types and events
pub mod types;

// Re-export commonly used types
pub use cache::{CacheStore, MemoryCacheStore, SqliteCacheStore};
pub use config::{HttpSourceConfig, SyncConfig};
pub use connectivity::{AlwaysOnline, ConnectivityProbe, SharedConnectivity};
pub use engine::{ListenerHandle, SyncEngine};
pub use error::{CacheError, Error, FetchError, Result};
pub use notifier::ChangeNotifier;
pub use source::{HttpRemoteSource, PageEnvelope, RemoteSource};
pub use types::{
    ChangeEvent, Cursor, ListState, Page, SyncEntity, SyncSnapshot, UserMessage,
};
