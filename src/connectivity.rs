//! Connectivity probing
//!
//! The engine consults a [`ConnectivityProbe`] at the start of every sync
//! pass to decide between the network path and the cache fallback. The probe
//! is a point-in-time report, not a subscription: the engine asks, it never
//! listens.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Reports whether the device currently has network access.
pub trait ConnectivityProbe: Send + Sync {
    /// Whether the network path should be attempted right now.
    fn is_online(&self) -> bool;
}

/// Probe that always reports connectivity.
///
/// Suitable for hosts without a platform connectivity signal; the engine
/// then always takes the network path and surfaces failures as
/// [`UserMessage::NoConnection`](crate::types::UserMessage::NoConnection).
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysOnline;

impl ConnectivityProbe for AlwaysOnline {
    fn is_online(&self) -> bool {
        true
    }
}

/// Probe backed by a shared flag the host toggles from its platform
/// connectivity callbacks.
///
/// Cheap to clone; all clones observe the same flag.
#[derive(Clone, Debug)]
pub struct SharedConnectivity {
    online: Arc<AtomicBool>,
}

impl SharedConnectivity {
    /// Create a probe with the given initial state.
    pub fn new(online: bool) -> Self {
        Self {
            online: Arc::new(AtomicBool::new(online)),
        }
    }

    /// Update the connectivity state.
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }
}

impl ConnectivityProbe for SharedConnectivity {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }
}
