use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entity::{Story, StoryId};

/// One entry of a stored collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Record {
    Story(Story),
    /// An entry that does not fit the story schema, kept verbatim so a save
    /// writes it back unchanged.
    Foreign(Value),
}

impl Record {
    /// The raw `id` member of a foreign record.
    fn foreign_id(&self) -> Option<&Value> {
        match self {
            Record::Story(_) => None,
            Record::Foreign(value) => value.get("id"),
        }
    }
}

/// Stories in storage order, interleaved with any foreign records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    records: Vec<Record>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stories(&self) -> impl Iterator<Item = &Story> {
        self.records.iter().filter_map(|r| match r {
            Record::Story(story) => Some(story),
            Record::Foreign(_) => None,
        })
    }

    pub fn into_stories(self) -> Vec<Story> {
        self.records
            .into_iter()
            .filter_map(|r| match r {
                Record::Story(story) => Some(story),
                Record::Foreign(_) => None,
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn foreign_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r, Record::Foreign(_)))
            .count()
    }

    pub fn find(&self, id: &StoryId) -> Option<&Story> {
        self.stories().find(|s| &s.id == id)
    }

    pub fn find_mut(&mut self, id: &StoryId) -> Option<&mut Story> {
        self.records.iter_mut().find_map(|r| match r {
            Record::Story(story) if &story.id == id => Some(story),
            _ => None,
        })
    }

    pub fn push(&mut self, story: Story) {
        self.records.push(Record::Story(story));
    }

    pub fn remove(&mut self, id: &StoryId) -> Option<Story> {
        let index = self
            .records
            .iter()
            .position(|r| matches!(r, Record::Story(story) if &story.id == id))?;
        match self.records.remove(index) {
            Record::Story(story) => Some(story),
            Record::Foreign(_) => None,
        }
    }

    /// Highest integer id held by any record, foreign ones included.
    pub fn max_number_id(&self) -> Option<u64> {
        self.records
            .iter()
            .filter_map(|r| match r {
                Record::Story(story) => story.id.as_number(),
                Record::Foreign(_) => r.foreign_id().and_then(Value::as_u64),
            })
            .max()
    }

    /// Whether any record, foreign ones included, already uses `token` as its id.
    pub fn has_token(&self, token: &str) -> bool {
        self.records.iter().any(|r| match r {
            Record::Story(story) => matches!(&story.id, StoryId::Token(t) if t == token),
            Record::Foreign(_) => r.foreign_id().and_then(Value::as_str) == Some(token),
        })
    }
}

impl From<Vec<Story>> for Collection {
    fn from(stories: Vec<Story>) -> Self {
        Self {
            records: stories.into_iter().map(Record::Story).collect(),
        }
    }
}
