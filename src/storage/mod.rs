//! # Storage Layer
//!
//! Stories are always read and written as a whole collection: every
//! mutation loads everything, changes it in memory, and saves everything
//! back. Callers serialize access (the HTTP layer holds a mutex around the
//! service), so no partial-update primitive exists.
//!
//! ## Implementations
//!
//! - [`JsonFileStore`]: one pretty-printed JSON array on disk.
//! - [`MemoryStore`]: a [`Collection`] that lives as long as the process.
//!
//! Entries that do not match the story schema are loaded as
//! [`Record::Foreign`] and saved back untouched, and their ids stay taken.

mod collection;
mod json_store;
mod memory_store;

pub use collection::{Collection, Record};
pub use json_store::JsonFileStore;
pub use memory_store::MemoryStore;

use crate::error::Result;

/// Backing storage for a story collection.
pub trait StoryStore: Send {
    /// The full collection in storage order.
    ///
    /// Missing or unreadable backing data yields an empty collection rather
    /// than an error.
    fn load(&self) -> Collection;

    /// Replace the persisted collection with `collection`.
    fn save(&mut self, collection: &Collection) -> Result<()>;
}
