use super::{Collection, StoryStore};
use crate::entity::Story;
use crate::error::Result;

/// Keeps the collection in process memory; contents vanish on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collection: Collection,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that starts out holding `stories`.
    pub fn seeded(stories: Vec<Story>) -> Self {
        Self {
            collection: Collection::from(stories),
        }
    }
}

impl StoryStore for MemoryStore {
    fn load(&self) -> Collection {
        self.collection.clone()
    }

    fn save(&mut self, collection: &Collection) -> Result<()> {
        self.collection = collection.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_by_default() {
        assert!(MemoryStore::new().load().is_empty());
    }

    #[test]
    fn test_save_replaces_contents() {
        let mut store = MemoryStore::seeded(vec![Story::capsule(
            "a".to_string(),
            "first".to_string(),
        )]);
        assert_eq!(store.load().stories().count(), 1);

        let replacement = vec![
            Story::capsule("b".to_string(), "second".to_string()),
            Story::capsule("c".to_string(), "third".to_string()),
        ];
        store.save(&Collection::from(replacement.clone())).unwrap();
        assert_eq!(store.load().into_stories(), replacement);
    }
}
