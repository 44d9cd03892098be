// src/entity/status.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoryStatus {
    #[default]
    Draft,
    Online,
    Completed,
}

impl StoryStatus {
    /// Next status in the publishing sequence, or `None` once completed.
    pub fn advance(self) -> Option<StoryStatus> {
        match self {
            StoryStatus::Draft => Some(StoryStatus::Online),
            StoryStatus::Online => Some(StoryStatus::Completed),
            StoryStatus::Completed => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.advance().is_none()
    }
}

impl std::fmt::Display for StoryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoryStatus::Draft => write!(f, "draft"),
            StoryStatus::Online => write!(f, "online"),
            StoryStatus::Completed => write!(f, "completed"),
        }
    }
}

impl std::str::FromStr for StoryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(StoryStatus::Draft),
            "online" => Ok(StoryStatus::Online),
            "completed" => Ok(StoryStatus::Completed),
            _ => Err(format!("Invalid story status: {}", s)),
        }
    }
}
