//! Story CRUD and the capsule status machine, on top of a [`StoryStore`].

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::info;
use uuid::Uuid;

use crate::entity::{Choice, Story, StoryId, StoryStatus};
use crate::error::{Result, TalesError};
use crate::storage::{Collection, StoryStore};

pub const MISSING_FIELDS: &str = "Missing required fields";
pub const MESSAGE_REQUIRED: &str = "Message is required";
pub const IDS_EXHAUSTED: &str = "No story ids left";
pub const NOW_ONLINE: &str = "Story is now online";
pub const STORAGE_COMPLETED: &str = "Story storage completed";
pub const ALREADY_COMPLETED: &str = "Story already completed";

/// Fields accepted when creating a library story.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewStory {
    pub title: Option<String>,
    pub author: Option<String>,
    pub content: Option<String>,
    pub choices: Option<Vec<Choice>>,
}

/// Outcome of [`StoryService::advance`].
#[derive(Debug, Clone)]
pub struct Advance {
    pub story: Story,
    /// `false` when the story was already completed and nothing changed.
    pub advanced: bool,
    pub message: &'static str,
}

/// Owns a story store and applies every operation as load, mutate, save.
pub struct StoryService {
    store: Box<dyn StoryStore>,
}

impl StoryService {
    pub fn new(store: impl StoryStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    pub fn list(&self) -> Vec<Story> {
        self.store.load().into_stories()
    }

    pub fn get(&self, id: &StoryId) -> Result<Story> {
        self.store
            .load()
            .find(id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    /// Create a library story with the next integer id.
    pub fn create(&mut self, new: NewStory) -> Result<Story> {
        let (Some(title), Some(author), Some(content)) = (
            required(new.title),
            required(new.author),
            required(new.content),
        ) else {
            return Err(TalesError::Validation(MISSING_FIELDS.to_string()));
        };

        let mut collection = self.store.load();
        let id = collection
            .max_number_id()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or_else(|| TalesError::Validation(IDS_EXHAUSTED.to_string()))?;
        let choices = new.choices.unwrap_or_else(|| vec![Choice::back()]);

        let story = Story::library(id, title, author, content, choices);
        collection.push(story.clone());
        self.store.save(&collection)?;

        info!(id = %story.id, title = story.title_or_untitled(), "story created");
        Ok(story)
    }

    /// Create a capsule in `draft` with a fresh token id.
    pub fn draft(&mut self, message: Option<String>) -> Result<Story> {
        let Some(message) = required(message) else {
            return Err(TalesError::Validation(MESSAGE_REQUIRED.to_string()));
        };

        let mut collection = self.store.load();
        let token = loop {
            let candidate = Uuid::new_v4().to_string();
            if !collection.has_token(&candidate) {
                break candidate;
            }
        };

        let story = Story::capsule(token, message);
        collection.push(story.clone());
        self.store.save(&collection)?;

        info!(id = %story.id, "capsule drafted");
        Ok(story)
    }

    /// Shallow-merge `fields` over a stored story.
    ///
    /// `id`, `createdAt` and `status` may be repeated with their current
    /// values but never changed.
    pub fn update(&mut self, id: &StoryId, mut fields: Map<String, Value>) -> Result<Story> {
        let mut collection = self.store.load();
        let current = stored_mut(&mut collection, id)?;

        if let Some(value) = fields.get("id") {
            if serde_json::from_value::<StoryId>(value.clone()).ok().as_ref() != Some(&current.id) {
                return Err(TalesError::Validation("Story id cannot be changed".to_string()));
            }
        }
        if let Some(value) = fields.get("createdAt") {
            if serde_json::from_value::<Option<DateTime<Utc>>>(value.clone()).ok()
                != Some(current.created_at)
            {
                return Err(TalesError::Validation(
                    "Story creation time cannot be changed".to_string(),
                ));
            }
        }
        if let Some(value) = fields.get("status") {
            if serde_json::from_value::<Option<StoryStatus>>(value.clone()).ok()
                != Some(current.status)
            {
                return Err(TalesError::Validation(
                    "Story status can only change by advancing it".to_string(),
                ));
            }
        }

        fields.remove("createdAt");

        let Value::Object(mut merged) = serde_json::to_value(&*current)? else {
            return Err(TalesError::Validation("Stored story is not an object".to_string()));
        };
        for (key, value) in fields {
            merged.insert(key, value);
        }

        let updated: Story = serde_json::from_value(Value::Object(merged))
            .map_err(|e| TalesError::Validation(format!("Invalid story fields: {}", e)))?;
        *current = updated.clone();
        self.store.save(&collection)?;

        info!(id = %updated.id, "story updated");
        Ok(updated)
    }

    /// Remove a story, returning the removed record.
    pub fn delete(&mut self, id: &StoryId) -> Result<Story> {
        let mut collection = self.store.load();
        let removed = collection.remove(id).ok_or_else(|| not_found(id))?;
        self.store.save(&collection)?;

        info!(id = %removed.id, "story deleted");
        Ok(removed)
    }

    /// Move a story one step along `draft → online → completed`.
    ///
    /// A story without a status counts as published (`online`).
    pub fn advance(&mut self, id: &StoryId) -> Result<Advance> {
        let mut collection = self.store.load();
        let stored = stored_mut(&mut collection, id)?;
        let current = stored.status.unwrap_or(StoryStatus::Online);

        let Some(next) = current.advance() else {
            return Ok(Advance {
                story: stored.clone(),
                advanced: false,
                message: ALREADY_COMPLETED,
            });
        };

        stored.status = Some(next);
        let story = stored.clone();
        self.store.save(&collection)?;

        info!(id = %story.id, from = %current, to = %next, "story advanced");
        let message = if next.is_terminal() {
            STORAGE_COMPLETED
        } else {
            NOW_ONLINE
        };
        Ok(Advance {
            story,
            advanced: true,
            message,
        })
    }
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn not_found(id: &StoryId) -> TalesError {
    TalesError::StoryNotFound(id.to_string())
}

fn stored_mut<'a>(collection: &'a mut Collection, id: &StoryId) -> Result<&'a mut Story> {
    collection.find_mut(id).ok_or_else(|| not_found(id))
}
