// src/entity/story.rs
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Choice, StoryId, StoryStatus};

/// A story record shared by the library and the capsule service.
///
/// Library stories carry `title`, `author`, `content`, `choices` and
/// `createdAt`; capsules carry `message` and `status`. Fields a variant does
/// not use stay `None` and are left out of the JSON form. Keys this type does
/// not know about are kept in `extra` so a load/save cycle is lossless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub id: StoryId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<Choice>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StoryStatus>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "millis_timestamp"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Story {
    /// A file-backed library story, stamped with the current time.
    pub fn library(
        id: u64,
        title: String,
        author: String,
        content: String,
        choices: Vec<Choice>,
    ) -> Self {
        Self {
            id: StoryId::Number(id),
            title: Some(title),
            author: Some(author),
            content: Some(content),
            message: None,
            choices: Some(choices),
            status: None,
            created_at: Some(Utc::now().trunc_subsecs(3)),
            extra: Map::new(),
        }
    }

    /// An in-memory capsule in the `draft` state.
    pub fn capsule(id: String, message: String) -> Self {
        Self {
            id: StoryId::Token(id),
            title: None,
            author: None,
            content: None,
            message: Some(message),
            choices: None,
            status: Some(StoryStatus::Draft),
            created_at: None,
            extra: Map::new(),
        }
    }

    /// The readable body: `content` for library stories, `message` for capsules.
    pub fn text(&self) -> &str {
        self.content
            .as_deref()
            .or(self.message.as_deref())
            .unwrap_or("")
    }

    pub fn title_or_untitled(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled")
    }
}

/// `createdAt` is written as `2024-05-01T10:00:00.000Z`, always with millisecond precision.
mod millis_timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<DateTime<Utc>>::deserialize(deserializer)
    }
}
