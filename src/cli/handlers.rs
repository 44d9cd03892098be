use std::path::PathBuf;

use tokio::net::TcpListener;
use tracing::{info, warn};

use super::commands::DEFAULT_ADMIN_KEY;
use crate::auth::SharedSecret;
use crate::entity::{Story, StoryId};
use crate::error::Result;
use crate::reader;
use crate::server::{self, capsule, CapsuleState, LibraryState};
use crate::service::StoryService;
use crate::storage::{JsonFileStore, MemoryStore, StoryStore};

/// Build a runtime and serve `router` on `bind` until shutdown.
fn run_server(bind: &str, router: axum::Router) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let listener = TcpListener::bind(bind).await?;
        server::serve(listener, router).await
    })?;
    Ok(())
}

pub fn handle_serve(bind: String, file: PathBuf, admin_key: String) -> Result<()> {
    if admin_key == DEFAULT_ADMIN_KEY {
        warn!("using the default admin key; set TALES_ADMIN_KEY to change it");
    }
    info!(file = %file.display(), "serving story library");

    let service = StoryService::new(JsonFileStore::new(file));
    let state = LibraryState::new(service, SharedSecret::new(admin_key));
    run_server(&bind, server::library_router(state))
}

pub fn handle_capsule(bind: String, no_seed: bool) -> Result<()> {
    let store = if no_seed {
        MemoryStore::new()
    } else {
        MemoryStore::seeded(capsule::seed_stories())
    };
    info!(seeded = !no_seed, "serving story capsules");

    let state = CapsuleState::new(StoryService::new(store));
    run_server(&bind, server::capsule_router(state))
}

pub fn handle_list(file: PathBuf, json: bool) -> Result<()> {
    let collection = JsonFileStore::new(file).load();

    if json {
        println!("{}", serde_json::to_string_pretty(&collection)?);
        return Ok(());
    }

    let stories = collection.into_stories();
    if stories.is_empty() {
        println!("No stories yet.");
        return Ok(());
    }
    for story in &stories {
        println!("{}", format_story_line(story));
    }
    Ok(())
}

pub fn handle_read(id: u64, file: PathBuf) -> Result<()> {
    let service = StoryService::new(JsonFileStore::new(file));
    let story = service.get(&StoryId::Number(id))?;

    println!("{}", story.title_or_untitled());
    if let Some(author) = &story.author {
        println!("by {}", author);
    }
    println!();
    for (i, sentence) in reader::sentences(story.text()).iter().enumerate() {
        println!("{:>3}. {}", i + 1, sentence);
    }
    Ok(())
}

/// One listing line: id, title and author.
pub fn format_story_line(story: &Story) -> String {
    format!(
        "{:>4}  {}  (by {})",
        story.id,
        story.title_or_untitled(),
        story.author.as_deref().unwrap_or("unknown")
    )
}
