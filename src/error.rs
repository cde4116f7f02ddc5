//! Error types for listsync
//!
//! Two layers of errors exist:
//! - [`FetchError`] — the taxonomy produced by remote sources and consumed
//!   (never propagated) by the sync engine.
//! - [`Error`] — the crate-level error for fallible construction and cache
//!   writes.
//!
//! Engine operations themselves are infallible from the caller's point of
//! view: every remote failure is caught and surfaced as a single
//! [`UserMessage`](crate::types::UserMessage).

use crate::types::UserMessage;
use thiserror::Error;

/// Result type alias for listsync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for listsync
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "endpoint")
        key: Option<String>,
    },

    /// Cache store operation failed
    #[error("cache error: {0}")]
    Cache(#[from] CacheError),

    /// Remote fetch failed
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure taxonomy for a single remote page fetch.
///
/// Sources make exactly one attempt per invocation; retries, if desired,
/// are the caller's responsibility.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connectivity-level failure (no route, timeout, connection refused)
    #[error("network unreachable: {0}")]
    Network(String),

    /// The remote responded, but with a failure status
    #[error("server responded with status {status}: {message}")]
    Server {
        /// HTTP status code (or backend-specific failure code)
        status: u16,
        /// Failure detail from the response body
        message: String,
    },

    /// Anything uncategorized (malformed body, unexpected client failure)
    #[error("{0}")]
    Unknown(String),
}

impl FetchError {
    /// The single human-readable notice this failure produces.
    pub fn user_message(&self) -> UserMessage {
        match self {
            FetchError::Network(_) => UserMessage::NoConnection,
            FetchError::Server { .. } | FetchError::Unknown(_) => UserMessage::Unexpected,
        }
    }
}

/// Cache-store backend errors
///
/// Only writes surface these; reads degrade to an empty snapshot instead
/// (see [`CacheStore::get_all`](crate::cache::CacheStore::get_all)).
#[derive(Debug, Error)]
pub enum CacheError {
    /// Failed to open the backing database
    #[error("failed to open cache database: {0}")]
    OpenFailed(String),

    /// Failed to create the cache schema
    #[error("failed to run migrations: {0}")]
    MigrationFailed(String),

    /// A write query failed
    #[error("write failed: {0}")]
    WriteFailed(String),

    /// Entity payload could not be encoded
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
