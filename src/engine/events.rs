//! External change application and the notifier listener task.

use super::SyncEngine;
use crate::notifier::ChangeNotifier;
use crate::types::{ChangeEvent, SyncEntity};
use futures::StreamExt;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_util::sync::CancellationToken;

impl<T: SyncEntity> SyncEngine<T> {
    /// Apply an external domain-change event.
    ///
    /// List-level events ([`ChangeEvent::ListInvalidated`],
    /// [`ChangeEvent::ItemAdded`]) trigger a full [`refresh`](Self::refresh);
    /// if a sync pass is already in flight the trigger collapses into it and
    /// is not queued. [`ChangeEvent::ItemUpdated`] replaces the matching
    /// entity in place — order preserved, no network round-trip — and
    /// republishes; an update for an entity not currently in the list is
    /// ignored.
    pub async fn apply_change(&self, event: ChangeEvent<T>) {
        match event {
            ChangeEvent::ListInvalidated | ChangeEvent::ItemAdded => {
                self.refresh().await;
            }
            ChangeEvent::ItemUpdated(item) => {
                let id = item.id();
                let mut core = self.core.lock().await;
                let Some(slot) = core.items.iter_mut().find(|existing| existing.id() == id)
                else {
                    tracing::debug!(
                        list = %self.config.name,
                        entity = %id,
                        "update for absent entity ignored"
                    );
                    return;
                };
                *slot = item;
                tracing::debug!(list = %self.config.name, entity = %id, "entity replaced in place");

                // Preserve the spinner flag a concurrent warm refresh may
                // have published; this event does not end that pass.
                let refreshing = self.state_tx.borrow().refreshing;
                self.publish(&core, refreshing);
            }
        }
    }

    /// Spawn the background task forwarding notifier events into
    /// [`apply_change`](Self::apply_change).
    ///
    /// The task runs until the handle is stopped or the last notifier clone
    /// is dropped. A listener that lags behind the notifier's buffer skips
    /// to live events; that is safe because snapshots are idempotent, and a
    /// skipped list-level event is subsumed by the refresh the next one
    /// triggers.
    pub fn spawn_listener(self: &Arc<Self>, notifier: &ChangeNotifier<T>) -> ListenerHandle {
        let engine = Arc::clone(self);
        let mut events = notifier.stream();
        let token = CancellationToken::new();
        let task_token = token.clone();

        let join = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = task_token.cancelled() => break,
                    next = events.next() => match next {
                        Some(Ok(event)) => engine.apply_change(event).await,
                        Some(Err(BroadcastStreamRecvError::Lagged(skipped))) => {
                            tracing::warn!(
                                list = %engine.config.name,
                                skipped,
                                "change listener lagged, skipping to live events"
                            );
                        }
                        None => break,
                    },
                }
            }
            tracing::debug!(list = %engine.config.name, "change listener stopped");
        });

        ListenerHandle { token, join }
    }
}

/// Handle to a spawned change-listener task.
///
/// Stopping the handle tears down only the listener; an in-flight sync pass
/// is never cancelled — it completes and its result is simply no longer
/// observed once the owning scope is gone.
pub struct ListenerHandle {
    token: CancellationToken,
    join: JoinHandle<()>,
}

impl ListenerHandle {
    /// Request the listener task to stop.
    pub fn stop(&self) {
        self.token.cancel();
    }

    /// Whether the listener task has exited.
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Wait for the listener task to exit.
    pub async fn stopped(self) {
        // A cancelled task is the expected outcome here, not an error.
        self.join.await.ok();
    }
}
