//! Basic synchronization example
//!
//! Wires an engine to an HTTP backend and a SQLite cache, performs a
//! refresh plus incremental pagination, and writes the cache through so a
//! later offline session can come up from it.

use listsync::{
    AlwaysOnline, CacheStore, HttpRemoteSource, HttpSourceConfig, ListState, SqliteCacheStore,
    SyncConfig, SyncEngine, SyncEntity,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Course {
    id: String,
    name: String,
}

impl SyncEntity for Course {
    type Id = String;
    fn id(&self) -> String {
        self.id.clone()
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut source_config =
        HttpSourceConfig::new("https://api.example.com/api/mobile/v1/users/me/courses");
    source_config.query = vec![("org".to_string(), "example".to_string())];
    let source = HttpRemoteSource::new(source_config)?;

    let cache = Arc::new(SqliteCacheStore::open(Path::new("courses.db"), "courses").await?);

    let engine = Arc::new(SyncEngine::<Course>::new(
        Arc::new(source),
        cache.clone(),
        Arc::new(AlwaysOnline),
        SyncConfig::named("courses"),
    ));

    // Surface error notices the way a UI would show a snackbar.
    let mut messages = engine
        .messages()
        .ok_or("message receiver already taken")?;
    tokio::spawn(async move {
        while let Some(notice) = messages.recv().await {
            eprintln!("[NOTICE] {notice}");
        }
    });

    // Initial load.
    engine.refresh().await;
    print_snapshot(&engine);

    // Pull in the rest of the list.
    while engine.snapshot().can_load_more {
        engine.load_more().await;
        print_snapshot(&engine);
    }

    // Write-through after a successful full sync: the next offline start
    // will show this list.
    if let ListState::Data(items) = engine.snapshot().state {
        cache.replace_all(&items).await?;
        println!("cached {} courses", items.len());
    }

    Ok(())
}

fn print_snapshot(engine: &SyncEngine<Course>) {
    match engine.snapshot().state {
        ListState::Loading => println!("loading..."),
        ListState::Empty => println!("no courses"),
        ListState::Data(items) => {
            println!("{} courses:", items.len());
            for course in items {
                println!("  {} ({})", course.name, course.id);
            }
        }
    }
}
