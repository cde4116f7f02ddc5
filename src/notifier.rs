//! Domain-change broadcast bus
//!
//! A [`ChangeNotifier`] carries [`ChangeEvent`]s from whatever part of the
//! host application mutates domain data (an enrollment flow, a thread
//! composer) to the sync engines observing that data. It is a thin wrapper
//! over a tokio broadcast channel:
//!
//! - multiple producers, multiple subscribers
//! - a subscription yields only events emitted after it was created
//! - delivery order is the emission order of each individual producer
//!
//! Events are consumed by [`SyncEngine::spawn_listener`], but nothing stops
//! a host from subscribing directly.
//!
//! [`SyncEngine::spawn_listener`]: crate::engine::SyncEngine::spawn_listener

use crate::types::{ChangeEvent, SyncEntity};
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;

/// Default event buffer per subscriber.
const DEFAULT_CAPACITY: usize = 256;

/// Broadcast channel for domain-change events.
///
/// Cheap to clone; all clones publish into the same channel.
#[derive(Clone, Debug)]
pub struct ChangeNotifier<T: SyncEntity> {
    tx: broadcast::Sender<ChangeEvent<T>>,
}

impl<T: SyncEntity> ChangeNotifier<T> {
    /// Create a notifier with the default per-subscriber buffer.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a notifier with an explicit per-subscriber buffer.
    ///
    /// A subscriber that falls more than `capacity` events behind skips
    /// ahead and observes a lag; engine listeners tolerate this because
    /// snapshots are idempotent.
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish an event to all current subscribers.
    ///
    /// Returns the number of subscribers the event reached. An event with no
    /// subscribers is dropped, not queued: a later subscriber never sees it.
    pub fn notify(&self, event: ChangeEvent<T>) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    /// Subscribe to future events.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent<T>> {
        self.tx.subscribe()
    }

    /// Subscribe to future events as a lazy stream.
    ///
    /// The stream is infinite while any notifier clone is alive and ends
    /// when the last one is dropped.
    pub fn stream(&self) -> BroadcastStream<ChangeEvent<T>> {
        BroadcastStream::new(self.subscribe())
    }
}

impl<T: SyncEntity> Default for ChangeNotifier<T> {
    fn default() -> Self {
        Self::new()
    }
}
