//! Shared test helpers for creating SyncEngine instances in tests.

use crate::cache::{CacheStore, MemoryCacheStore};
use crate::config::SyncConfig;
use crate::connectivity::SharedConnectivity;
use crate::engine::SyncEngine;
use crate::error::FetchError;
use crate::source::RemoteSource;
use crate::types::{Page, SyncEntity, UserMessage};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{Semaphore, mpsc};

/// Minimal entity for engine tests.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct Course {
    pub(crate) id: String,
    pub(crate) title: String,
}

impl SyncEntity for Course {
    type Id = String;
    fn id(&self) -> String {
        self.id.clone()
    }
}

pub(crate) fn course(id: &str) -> Course {
    Course {
        id: id.to_string(),
        title: format!("Course {id}"),
    }
}

pub(crate) fn titled(id: &str, title: &str) -> Course {
    Course {
        id: id.to_string(),
        title: title.to_string(),
    }
}

pub(crate) fn page(ids: &[&str], has_next: bool, page_number: u32, total_pages: u32) -> Page<Course> {
    Page {
        items: ids.iter().map(|id| course(id)).collect(),
        has_next,
        page_number,
        total_pages,
    }
}

/// Remote source replaying a scripted response sequence.
///
/// Panics on an unscripted fetch so tests catch stray network calls. An
/// optional gate semaphore holds each fetch until a permit is granted,
/// which lets tests observe the in-flight guard.
pub(crate) struct ScriptedSource {
    responses: Mutex<VecDeque<Result<Page<Course>, FetchError>>>,
    requested_pages: Mutex<Vec<u32>>,
    gate: Option<Arc<Semaphore>>,
}

impl ScriptedSource {
    pub(crate) fn new(responses: Vec<Result<Page<Course>, FetchError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requested_pages: Mutex::new(Vec::new()),
            gate: None,
        })
    }

    pub(crate) fn gated(
        responses: Vec<Result<Page<Course>, FetchError>>,
        gate: Arc<Semaphore>,
    ) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requested_pages: Mutex::new(Vec::new()),
            gate: Some(gate),
        })
    }

    /// Number of fetches that have been started (gated ones included).
    pub(crate) fn calls(&self) -> usize {
        self.requested_pages.lock().unwrap().len()
    }

    /// Page numbers in request order.
    pub(crate) fn requested_pages(&self) -> Vec<u32> {
        self.requested_pages.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteSource<Course> for ScriptedSource {
    async fn fetch_page(&self, page: u32) -> Result<Page<Course>, FetchError> {
        // Record before gating so tests can see the fetch is in flight.
        self.requested_pages.lock().unwrap().push(page);

        if let Some(gate) = &self.gate {
            let permit = gate.acquire().await.expect("gate semaphore closed");
            permit.forget();
        }

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unscripted fetch of page {page}"))
    }
}

/// An engine plus handles to all its collaborators.
pub(crate) struct TestRig {
    pub(crate) engine: Arc<SyncEngine<Course>>,
    pub(crate) source: Arc<ScriptedSource>,
    pub(crate) connectivity: SharedConnectivity,
    pub(crate) cache: Arc<MemoryCacheStore<Course>>,
    pub(crate) messages: mpsc::Receiver<UserMessage>,
}

/// Online engine with an empty cache.
pub(crate) fn rig(responses: Vec<Result<Page<Course>, FetchError>>) -> TestRig {
    rig_from_source(ScriptedSource::new(responses), true)
}

/// Engine with explicit connectivity and pre-seeded cache contents.
pub(crate) async fn rig_with(
    responses: Vec<Result<Page<Course>, FetchError>>,
    online: bool,
    cached: Vec<Course>,
) -> TestRig {
    let rig = rig_from_source(ScriptedSource::new(responses), online);
    rig.cache.replace_all(&cached).await.unwrap();
    rig
}

/// Online engine whose source blocks on the returned gate.
pub(crate) fn gated_rig(
    responses: Vec<Result<Page<Course>, FetchError>>,
) -> (TestRig, Arc<Semaphore>) {
    let gate = Arc::new(Semaphore::new(0));
    let rig = rig_from_source(ScriptedSource::gated(responses, gate.clone()), true);
    (rig, gate)
}

fn rig_from_source(source: Arc<ScriptedSource>, online: bool) -> TestRig {
    let connectivity = SharedConnectivity::new(online);
    let cache = Arc::new(MemoryCacheStore::new());

    let engine = Arc::new(SyncEngine::new(
        source.clone(),
        cache.clone(),
        Arc::new(connectivity.clone()),
        SyncConfig::named("test-list"),
    ));
    let messages = engine.messages().expect("fresh engine must yield the message receiver");

    TestRig {
        engine,
        source,
        connectivity,
        cache,
        messages,
    }
}

/// Poll until `predicate` holds, panicking after a bounded wait.
pub(crate) async fn wait_until(what: &str, mut predicate: impl FnMut() -> bool) {
    for _ in 0..200 {
        if predicate() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("timed out waiting for {what}");
}
