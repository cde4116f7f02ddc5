//! Refresh and incremental pagination sync passes.
//!
//! Both entry points funnel through the same merge rules: page 1 replaces
//! the list, later pages append, and the cursor advances only while the
//! page count agrees with the next-link. The cache fallback belongs to
//! `refresh` alone — pagination beyond the first page requires connectivity.

use super::SyncEngine;
use crate::error::FetchError;
use crate::types::{Cursor, SyncEntity};

/// Page number every fresh sync pass starts from.
const FIRST_PAGE: u32 = 1;

impl<T: SyncEntity> SyncEngine<T> {
    /// Perform a full reload of the list.
    ///
    /// Online, fetches page 1 and replaces the list with it; offline, reads
    /// the cache snapshot instead and closes pagination. Returns `false`
    /// when the call was dropped because another sync pass holds the fetch
    /// slot, `true` when a pass actually ran (even if it failed).
    ///
    /// Failures never propagate: they surface as one
    /// [`UserMessage`](crate::types::UserMessage) and the last-good snapshot
    /// stays published. A cold-start failure publishes
    /// [`ListState::Empty`](crate::types::ListState::Empty) since there is
    /// nothing good to keep.
    pub async fn refresh(&self) -> bool {
        let Ok(_permit) = self.fetch_slot.try_acquire() else {
            tracing::debug!(list = %self.config.name, "refresh dropped, sync pass already in flight");
            return false;
        };

        {
            let core = self.core.lock().await;
            if core.has_synced {
                // Warm refresh: keep showing the current list, flag the spinner.
                self.publish(&core, true);
            } else {
                self.publish_loading();
            }
        }

        if self.connectivity.is_online() {
            match self.source.fetch_page(FIRST_PAGE).await {
                Ok(page) => {
                    let mut core = self.core.lock().await;
                    core.cursor = page.next_cursor();
                    core.items = page.items;
                    core.has_synced = true;
                    tracing::debug!(
                        list = %self.config.name,
                        count = core.items.len(),
                        cursor = ?core.cursor,
                        "refresh synced from network"
                    );
                    self.publish(&core, false);
                }
                Err(err) => self.handle_fetch_failure(err).await,
            }
        } else {
            // First page of a fresh refresh is the only place the cache
            // fallback applies; no pagination follows an offline snapshot.
            let cached = self.cache.get_all().await;
            tracing::info!(
                list = %self.config.name,
                count = cached.len(),
                "offline refresh served from cache"
            );
            let mut core = self.core.lock().await;
            core.items = cached;
            core.cursor = Cursor::Done;
            core.has_synced = true;
            self.publish(&core, false);
        }

        true
    }

    /// Fetch the next page and append it to the list.
    ///
    /// A no-op returning `false` when pagination is exhausted, when another
    /// sync pass holds the fetch slot, or when the device is offline
    /// (pagination requires connectivity; nothing is published on
    /// rejection). A page already fetched in this engine's lifetime is
    /// never fetched again: the cursor only moves forward.
    pub async fn load_more(&self) -> bool {
        let Ok(_permit) = self.fetch_slot.try_acquire() else {
            tracing::debug!(list = %self.config.name, "load_more dropped, sync pass already in flight");
            return false;
        };

        let page_number = {
            let core = self.core.lock().await;
            match core.cursor {
                Cursor::Done => {
                    tracing::debug!(list = %self.config.name, "load_more ignored, pagination exhausted");
                    return false;
                }
                Cursor::Page(n) => n,
            }
        };

        if !self.connectivity.is_online() {
            tracing::debug!(
                list = %self.config.name,
                page = page_number,
                "load_more rejected while offline"
            );
            return false;
        }

        match self.source.fetch_page(page_number).await {
            Ok(page) => {
                let mut core = self.core.lock().await;
                core.cursor = page.next_cursor();
                if page_number == FIRST_PAGE {
                    core.items = page.items;
                } else {
                    core.items.extend(page.items);
                }
                core.has_synced = true;
                tracing::debug!(
                    list = %self.config.name,
                    page = page_number,
                    total = core.items.len(),
                    cursor = ?core.cursor,
                    "page merged"
                );
                self.publish(&core, false);
            }
            Err(err) => self.handle_fetch_failure(err).await,
        }

        true
    }

    /// Absorb a remote failure: one user notice, last-good state retained.
    async fn handle_fetch_failure(&self, err: FetchError) {
        tracing::warn!(list = %self.config.name, error = %err, "sync pass failed");
        self.notify_user(err.user_message());

        // Stale data beats a blank screen. On a cold start the list is
        // still empty and the published state degrades to Empty.
        let core = self.core.lock().await;
        self.publish(&core, false);
    }
}
