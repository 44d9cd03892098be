mod status;
mod story;

pub use status::StoryStatus;
pub use story::Story;

use serde::{Deserialize, Serialize};

/// Identifier of a story.
///
/// Library stories use auto-incremented integers; capsules use generated
/// string tokens. Serialized untagged, so the JSON form is a bare number or
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoryId {
    Number(u64),
    Token(String),
}

impl StoryId {
    /// Parse a path segment as a library id. Non-numeric input never matches a story.
    pub fn number(raw: &str) -> Option<Self> {
        raw.trim().parse().ok().map(StoryId::Number)
    }

    pub fn token(raw: impl Into<String>) -> Self {
        StoryId::Token(raw.into())
    }

    pub fn as_number(&self) -> Option<u64> {
        match self {
            StoryId::Number(n) => Some(*n),
            StoryId::Token(_) => None,
        }
    }
}

impl std::fmt::Display for StoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoryId::Number(n) => f.pad(&n.to_string()),
            StoryId::Token(t) => f.pad(t),
        }
    }
}

/// Navigation hint attached to a library story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub text: String,
    pub next: u64,
}

impl Choice {
    /// The choice every story gets when none are supplied.
    pub fn back() -> Self {
        Self {
            text: "Back".to_string(),
            next: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_story_id_untagged_json() {
        assert_eq!(serde_json::to_string(&StoryId::Number(7)).unwrap(), "7");
        assert_eq!(
            serde_json::to_string(&StoryId::token("adventure-001")).unwrap(),
            "\"adventure-001\""
        );

        let parsed: StoryId = serde_json::from_str("12").unwrap();
        assert_eq!(parsed, StoryId::Number(12));
        let parsed: StoryId = serde_json::from_str("\"12\"").unwrap();
        assert_eq!(parsed, StoryId::token("12"));
    }

    #[test]
    fn test_story_id_number_parsing() {
        assert_eq!(StoryId::number("3"), Some(StoryId::Number(3)));
        assert_eq!(StoryId::number("abc"), None);
        assert_eq!(StoryId::number("-1"), None);
        assert_eq!(StoryId::Number(3).as_number(), Some(3));
        assert_eq!(StoryId::token("x").as_number(), None);
    }

    #[test]
    fn test_back_choice() {
        let choice = Choice::back();
        assert_eq!(choice.text, "Back");
        assert_eq!(choice.next, 1);
    }
}
