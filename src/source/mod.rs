//! Remote page sources
//!
//! A [`RemoteSource`] produces one page of entities per call. It makes a
//! single attempt — no retry, no backoff; if the host wants retries it wraps
//! the source itself. The shipped implementation is [`HttpRemoteSource`],
//! which speaks the paginated REST envelope
//! (`next`/`previous`/`count`/`num_pages`/`current_page`/`results`).

use crate::error::FetchError;
use crate::types::{Page, SyncEntity};
use async_trait::async_trait;

mod http;

pub use http::{HttpRemoteSource, PageEnvelope};


/// A paginated network fetch abstraction.
///
/// Implementations own their timeout policy; the engine imposes none.
#[async_trait]
pub trait RemoteSource<T>: Send + Sync
where
    T: SyncEntity,
{
    /// Fetch one page of entities.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Network`] on a connectivity-level failure
    /// - [`FetchError::Server`] when the remote responded with a failure
    /// - [`FetchError::Unknown`] for anything uncategorized
    async fn fetch_page(&self, page: u32) -> Result<Page<T>, FetchError>;
}
