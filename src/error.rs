use thiserror::Error;

#[derive(Error, Debug)]
pub enum TalesError {
    #[error("Story not found: {0}")]
    StoryNotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("Unauthorized admin access")]
    Unauthorized,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TalesError>;
