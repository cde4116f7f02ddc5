//! Multiple observers and change propagation example
//!
//! Demonstrates how several parts of an application observe one engine
//! independently, and how a shared change notifier keeps the list current
//! when another screen mutates the domain.

use listsync::{
    AlwaysOnline, ChangeEvent, ChangeNotifier, HttpRemoteSource, HttpSourceConfig, ListState,
    MemoryCacheStore, SyncConfig, SyncEngine, SyncEntity,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Thread {
    id: String,
    title: String,
}

impl SyncEntity for Thread {
    type Id = String;
    fn id(&self) -> String {
        self.id.clone()
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let source = HttpRemoteSource::new(HttpSourceConfig::new(
        "https://api.example.com/api/discussion/v1/threads",
    ))?;

    let engine = Arc::new(SyncEngine::<Thread>::new(
        Arc::new(source),
        Arc::new(MemoryCacheStore::new()),
        Arc::new(AlwaysOnline),
        SyncConfig::named("threads"),
    ));

    // UI subscriber - renders every published snapshot
    let mut ui_snapshots = engine.subscribe();
    tokio::spawn(async move {
        println!("[UI] starting snapshot observer");
        while ui_snapshots.changed().await.is_ok() {
            let snapshot = ui_snapshots.borrow().clone();
            match snapshot.state {
                ListState::Loading => println!("[UI] spinner"),
                ListState::Empty => println!("[UI] empty state"),
                ListState::Data(items) => {
                    println!(
                        "[UI] {} threads (more: {}, refreshing: {})",
                        items.len(),
                        snapshot.can_load_more,
                        snapshot.refreshing
                    );
                }
            }
        }
    });

    // Analytics subscriber - only cares about list size changes
    let mut stats_snapshots = engine.subscribe();
    tokio::spawn(async move {
        while stats_snapshots.changed().await.is_ok() {
            if let ListState::Data(items) = &stats_snapshots.borrow().state {
                println!("[STATS] list size {}", items.len());
            }
        }
    });

    // The notifier is shared with whatever screens mutate threads.
    let notifier = ChangeNotifier::new();
    let listener = engine.spawn_listener(&notifier);

    engine.refresh().await;

    // Simulate another screen editing a thread: the engine patches the
    // list in place, no refetch.
    notifier.notify(ChangeEvent::ItemUpdated(Thread {
        id: "thread-1".to_string(),
        title: "Edited elsewhere".to_string(),
    }));

    // Simulate a new thread being posted: the engine refetches.
    notifier.notify(ChangeEvent::ItemAdded);

    // Let the listener drain before shutting down.
    tokio::time::sleep(Duration::from_secs(1)).await;
    listener.stop();
    listener.stopped().await;

    Ok(())
}
