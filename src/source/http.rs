//! HTTP-backed remote source

use super::RemoteSource;
use crate::config::HttpSourceConfig;
use crate::error::{Error, FetchError, Result};
use crate::types::{Page, SyncEntity};
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use url::Url;

/// Wire envelope of a paginated list response.
///
/// Matches the backend contract: the page body carries its entities under
/// `results` plus pagination metadata alongside. `next`/`previous` are page
/// URLs, empty or absent at the boundaries.
#[derive(Clone, Debug, Deserialize)]
pub struct PageEnvelope<T> {
    /// URL of the next page, absent or empty on the last page
    #[serde(default)]
    pub next: Option<String>,
    /// URL of the previous page, absent or empty on the first page
    #[serde(default)]
    pub previous: Option<String>,
    /// Total entity count across all pages
    #[serde(default)]
    pub count: u64,
    /// Total number of pages
    pub num_pages: u32,
    /// 1-based number of this page
    pub current_page: u32,
    /// Entities on this page
    pub results: Vec<T>,
}

impl<T> PageEnvelope<T> {
    /// Convert the wire envelope into the domain page.
    ///
    /// A `next` value that is present but empty counts as no next page
    /// (the backend serializes the first/last boundaries both ways).
    pub fn into_page(self) -> Page<T> {
        let has_next = self.next.as_deref().is_some_and(|next| !next.is_empty());
        Page {
            items: self.results,
            has_next,
            page_number: self.current_page,
            total_pages: self.num_pages,
        }
    }
}

/// Remote source fetching pages from a REST endpoint.
///
/// One instance per list endpoint. The page number is appended as a query
/// parameter next to any fixed scoping parameters from the config.
pub struct HttpRemoteSource<T> {
    client: reqwest::Client,
    endpoint: Url,
    page_param: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> HttpRemoteSource<T> {
    /// Build a source from its configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the endpoint URL is invalid or the
    /// HTTP client cannot be constructed.
    pub fn new(config: HttpSourceConfig) -> Result<Self> {
        let mut endpoint = Url::parse(&config.endpoint).map_err(|e| Error::Config {
            message: format!("invalid endpoint URL '{}': {}", config.endpoint, e),
            key: Some("endpoint".to_string()),
        })?;

        for (name, value) in &config.query {
            endpoint.query_pairs_mut().append_pair(name, value);
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Config {
                message: format!("failed to build HTTP client: {e}"),
                key: None,
            })?;

        Ok(Self {
            client,
            endpoint,
            page_param: config.page_param,
            _marker: PhantomData,
        })
    }

    fn page_url(&self, page: u32) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair(&self.page_param, &page.to_string());
        url
    }
}

#[async_trait]
impl<T> RemoteSource<T> for HttpRemoteSource<T>
where
    T: SyncEntity + DeserializeOwned,
{
    async fn fetch_page(&self, page: u32) -> std::result::Result<Page<T>, FetchError> {
        let url = self.page_url(page);
        tracing::debug!(%url, page, "fetching page");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FetchError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: PageEnvelope<T> = response
            .json()
            .await
            .map_err(|e| FetchError::Unknown(format!("malformed page body: {e}")))?;

        Ok(envelope.into_page())
    }
}

/// Map a reqwest transport error into the fetch taxonomy.
///
/// Timeouts count as connectivity failures: from the client's perspective
/// there is no usable route either way.
fn classify_transport_error(err: reqwest::Error) -> FetchError {
    if err.is_connect() || err.is_timeout() {
        FetchError::Network(err.to_string())
    } else {
        FetchError::Unknown(err.to_string())
    }
}
