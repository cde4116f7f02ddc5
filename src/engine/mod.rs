//! Sync policy engine split into focused submodules.
//!
//! The [`SyncEngine`] struct and its methods are organized by domain:
//! - [`fetch`](self) - `refresh`/`load_more` sync passes and the merge rules
//! - [`events`](self) - external change application and the listener task
//!
//! One engine instance serves one consumer scope (one screen). It owns the
//! list state exclusively and publishes immutable [`SyncSnapshot`]s through
//! a watch channel; nothing outside the engine can mutate the list.

mod events;
mod fetch;

pub use events::ListenerHandle;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;

use crate::cache::CacheStore;
use crate::config::SyncConfig;
use crate::connectivity::ConnectivityProbe;
use crate::source::RemoteSource;
use crate::types::{Cursor, ListState, SyncEntity, SyncSnapshot, UserMessage};
use std::sync::Arc;
use tokio::sync::{Mutex, Semaphore, mpsc, watch};

/// List state owned by the engine.
///
/// Mutated only under the engine's own lock; observers see it exclusively
/// through published snapshots.
pub(crate) struct EngineCore<T> {
    /// Accumulated entities across the current sync pass, in server order
    pub(crate) items: Vec<T>,
    /// Next page to fetch, or done
    pub(crate) cursor: Cursor,
    /// Whether any sync pass has populated state yet (cold-start detection)
    pub(crate) has_synced: bool,
}

/// Offline-aware paginated synchronization engine.
///
/// Decides per sync pass between network and cache, tracks the pagination
/// cursor, merges pages into list state, and reacts to external domain
/// changes. See the crate docs for the full policy.
pub struct SyncEngine<T: SyncEntity> {
    /// Paginated network fetch collaborator
    pub(crate) source: Arc<dyn RemoteSource<T>>,
    /// Offline fallback collaborator (read-only from the engine's side)
    pub(crate) cache: Arc<dyn CacheStore<T>>,
    /// Connectivity report consulted at the start of each sync pass
    pub(crate) connectivity: Arc<dyn ConnectivityProbe>,
    /// Engine behavior settings
    pub(crate) config: SyncConfig,
    /// Exclusively-owned list state
    pub(crate) core: Mutex<EngineCore<T>>,
    /// Single-permit guard: holds the one in-flight fetch slot. A sync pass
    /// that cannot take the permit is dropped, not queued.
    pub(crate) fetch_slot: Semaphore,
    /// Snapshot publication channel (observers subscribe here)
    pub(crate) state_tx: watch::Sender<SyncSnapshot<T>>,
    /// User-visible error notices, at-most-once delivery
    message_tx: mpsc::Sender<UserMessage>,
    /// Receiver side of the message channel until a consumer takes it
    message_rx: std::sync::Mutex<Option<mpsc::Receiver<UserMessage>>>,
}

impl<T: SyncEntity> SyncEngine<T> {
    /// Create an engine wired to its collaborators.
    ///
    /// The initial published snapshot is [`ListState::Loading`]; nothing is
    /// fetched until the first [`refresh`](Self::refresh) call.
    pub fn new(
        source: Arc<dyn RemoteSource<T>>,
        cache: Arc<dyn CacheStore<T>>,
        connectivity: Arc<dyn ConnectivityProbe>,
        config: SyncConfig,
    ) -> Self {
        let (state_tx, _rx) = watch::channel(SyncSnapshot::initial());
        let (message_tx, message_rx) = mpsc::channel(config.message_capacity.max(1));

        Self {
            source,
            cache,
            connectivity,
            config,
            core: Mutex::new(EngineCore {
                items: Vec::new(),
                cursor: Cursor::FIRST,
                has_synced: false,
            }),
            fetch_slot: Semaphore::new(1),
            state_tx,
            message_tx,
            message_rx: std::sync::Mutex::new(Some(message_rx)),
        }
    }

    /// Subscribe to state snapshots.
    ///
    /// The receiver always holds the latest snapshot; intermediate ones may
    /// be skipped under races (last-publish-wins), which is safe because
    /// snapshots are complete states, not deltas.
    pub fn subscribe(&self) -> watch::Receiver<SyncSnapshot<T>> {
        self.state_tx.subscribe()
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> SyncSnapshot<T> {
        self.state_tx.borrow().clone()
    }

    /// Take the user-message receiver.
    ///
    /// The channel is single-delivery: the receiver exists once, and each
    /// notice arrives at most once. Returns `None` on every call after the
    /// first.
    pub fn messages(&self) -> Option<mpsc::Receiver<UserMessage>> {
        self.message_rx.lock().ok().and_then(|mut rx| rx.take())
    }

    /// Whether the connectivity probe currently reports network access.
    pub fn has_connectivity(&self) -> bool {
        self.connectivity.is_online()
    }

    /// Publish a snapshot built from the current core state.
    pub(crate) fn publish(&self, core: &EngineCore<T>, refreshing: bool) {
        let state = if core.items.is_empty() {
            ListState::Empty
        } else {
            ListState::Data(core.items.clone())
        };
        self.state_tx.send_replace(SyncSnapshot {
            state,
            can_load_more: !core.cursor.is_done(),
            refreshing,
        });
    }

    /// Publish the cold-start loading snapshot.
    pub(crate) fn publish_loading(&self) {
        self.state_tx.send_replace(SyncSnapshot::initial());
    }

    /// Route a notice to the message channel.
    ///
    /// A full buffer or an absent consumer drops the notice — display is
    /// at-most-once, never queued indefinitely.
    pub(crate) fn notify_user(&self, message: UserMessage) {
        if let Err(e) = self.message_tx.try_send(message) {
            tracing::debug!(list = %self.config.name, error = %e, "user notice dropped");
        }
    }
}
