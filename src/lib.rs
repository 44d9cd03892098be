pub mod auth;
pub mod cli;
pub mod entity;
pub mod error;
pub mod reader;
pub mod server;
pub mod service;
pub mod storage;

pub use auth::{Authorizer, SharedSecret};
pub use entity::{Choice, Story, StoryId, StoryStatus};
pub use error::{Result, TalesError};
pub use service::StoryService;
pub use storage::{Collection, JsonFileStore, MemoryStore, Record, StoryStore};
