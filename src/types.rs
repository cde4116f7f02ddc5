//! Core types for listsync

use std::fmt;

/// A domain entity that can flow through a sync engine.
///
/// Entities are identified by a stable id and treated as immutable once
/// received from the network: updates replace the whole value, never mutate
/// it in place.
pub trait SyncEntity: Clone + Send + Sync + 'static {
    /// Stable identity type for this entity.
    type Id: Clone + Eq + Send + Sync + fmt::Display;

    /// The stable identity of this entity.
    fn id(&self) -> Self::Id;
}

/// One page of entities as returned by a remote source.
///
/// Pages are transient: only their entities are ever cached, the pagination
/// metadata is consumed immediately to advance the cursor.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    /// Entities on this page, in server order.
    pub items: Vec<T>,
    /// Whether the server advertises a further page (the "next" link).
    pub has_next: bool,
    /// 1-based number of this page.
    pub page_number: u32,
    /// Total number of pages the server reports.
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Compute the cursor position after consuming this page.
    ///
    /// The page count is authoritative over the next-link: a page that
    /// claims `has_next` while already being the last page by count is
    /// treated as final.
    pub fn next_cursor(&self) -> Cursor {
        if self.has_next && self.page_number != self.total_pages {
            Cursor::Page(self.page_number + 1)
        } else {
            Cursor::Done
        }
    }
}

/// The next page to fetch, or the sentinel meaning no further pages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cursor {
    /// Next page number to fetch (1-based).
    Page(u32),
    /// Pagination is exhausted for the current sync pass.
    Done,
}

impl Cursor {
    /// The cursor a fresh sync pass starts from.
    pub const FIRST: Cursor = Cursor::Page(1);

    /// Whether pagination is exhausted.
    pub fn is_done(&self) -> bool {
        matches!(self, Cursor::Done)
    }
}

/// List content as published to observers.
#[derive(Clone, Debug, PartialEq)]
pub enum ListState<T> {
    /// Initial load is in progress and nothing has been shown yet.
    Loading,
    /// A sync pass completed and produced no entities.
    Empty,
    /// A sync pass produced entities. Never carries an empty list.
    Data(Vec<T>),
}

/// Immutable snapshot of a sync engine's state.
///
/// Snapshots are published through a watch channel; observers always see the
/// latest one and can never mutate engine state through it.
#[derive(Clone, Debug, PartialEq)]
pub struct SyncSnapshot<T> {
    /// Current list content.
    pub state: ListState<T>,
    /// Whether a further page can be requested via `load_more`.
    pub can_load_more: bool,
    /// Whether a refresh of already-shown data is in flight.
    pub refreshing: bool,
}

impl<T> SyncSnapshot<T> {
    /// The snapshot a freshly created engine publishes.
    pub(crate) fn initial() -> Self {
        Self {
            state: ListState::Loading,
            can_load_more: false,
            refreshing: false,
        }
    }
}

/// A domain-change notification delivered through a [`ChangeNotifier`].
///
/// List-level events invalidate the whole list; item-level events carry the
/// replacement payload and are applied in place without a network round-trip.
///
/// [`ChangeNotifier`]: crate::notifier::ChangeNotifier
#[derive(Clone, Debug)]
pub enum ChangeEvent<T> {
    /// The list as a whole changed (e.g. an enrollment was added or removed).
    ListInvalidated,
    /// A new item exists that the current list does not contain.
    ItemAdded,
    /// A single item changed; the payload is the full replacement value.
    ItemUpdated(T),
}

/// Human-readable notice raised when a sync pass fails.
///
/// Delivered at most once per error through the engine's message channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserMessage {
    /// The network path was attempted and connectivity failed.
    NoConnection,
    /// Any other failure.
    Unexpected,
}

impl fmt::Display for UserMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserMessage::NoConnection => write!(f, "No internet connection"),
            UserMessage::Unexpected => write!(f, "Something went wrong, please try again"),
        }
    }
}
