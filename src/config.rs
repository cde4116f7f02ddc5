//! Configuration types for listsync

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Sync engine behavior configuration
///
/// All fields have sensible defaults; `SyncConfig::default()` is a working
/// configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Label for this list in log output (default: "list")
    ///
    /// Purely diagnostic; use the domain name of the list being synced
    /// ("courses", "threads").
    #[serde(default = "default_list_name")]
    pub name: String,

    /// Capacity of the user-message channel (default: 16)
    ///
    /// Messages beyond capacity are dropped, never queued unboundedly; each
    /// failure produces at most one message anyway.
    #[serde(default = "default_message_capacity")]
    pub message_capacity: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            name: default_list_name(),
            message_capacity: default_message_capacity(),
        }
    }
}

impl SyncConfig {
    /// Convenience constructor setting only the log label.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Configuration for an HTTP-backed remote source
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HttpSourceConfig {
    /// Endpoint URL serving the paginated list
    pub endpoint: String,

    /// Query parameter carrying the requested page number (default: "page")
    #[serde(default = "default_page_param")]
    pub page_param: String,

    /// Fixed query parameters sent with every request (default: none)
    ///
    /// Backend list endpoints typically take scoping parameters next to the
    /// page number (a course id, an ordering key); they belong here.
    #[serde(default)]
    pub query: Vec<(String, String)>,

    /// Request timeout (default: 30s)
    ///
    /// The engine imposes no timeout of its own; this is the only one.
    #[serde(default = "default_timeout")]
    pub timeout: Duration,
}

impl HttpSourceConfig {
    /// Configuration for `endpoint` with all other fields at their defaults.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            page_param: default_page_param(),
            query: Vec::new(),
            timeout: default_timeout(),
        }
    }
}

fn default_list_name() -> String {
    "list".to_string()
}

fn default_message_capacity() -> usize {
    16
}

fn default_page_param() -> String {
    "page".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}
