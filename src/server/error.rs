//! HTTP status codes and error bodies for the two services.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use crate::error::TalesError;

pub const STORY_NOT_FOUND: &str = "Story not found";
pub const SAVE_FAILED: &str = "Failed to save stories";

/// Get the HTTP status for an error.
pub fn status_code(err: &TalesError) -> StatusCode {
    match err {
        TalesError::Validation(_) => StatusCode::BAD_REQUEST,
        TalesError::StoryNotFound(_) => StatusCode::NOT_FOUND,
        TalesError::Unauthorized => StatusCode::FORBIDDEN,
        TalesError::Io(_) | TalesError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Message shown to clients. Storage details stay in the server log.
pub fn public_message(err: &TalesError) -> String {
    match err {
        TalesError::StoryNotFound(_) => STORY_NOT_FOUND.to_string(),
        TalesError::Validation(message) => message.clone(),
        TalesError::Unauthorized => err.to_string(),
        TalesError::Io(_) | TalesError::Json(_) => SAVE_FAILED.to_string(),
    }
}

fn log_if_internal(err: &TalesError) {
    if status_code(err).is_server_error() {
        error!(error = %err, "request failed");
    }
}

/// Library error, rendered as `{"error": "..."}`.
#[derive(Debug)]
pub struct LibraryError(pub TalesError);

impl From<TalesError> for LibraryError {
    fn from(err: TalesError) -> Self {
        Self(err)
    }
}

impl IntoResponse for LibraryError {
    fn into_response(self) -> Response {
        log_if_internal(&self.0);
        let body = json!({ "error": public_message(&self.0) });
        (status_code(&self.0), Json(body)).into_response()
    }
}

/// Capsule error, rendered as `{"success": false, "error": "..."}`.
#[derive(Debug)]
pub struct CapsuleError(pub TalesError);

impl From<TalesError> for CapsuleError {
    fn from(err: TalesError) -> Self {
        Self(err)
    }
}

impl IntoResponse for CapsuleError {
    fn into_response(self) -> Response {
        log_if_internal(&self.0);
        let body = json!({ "success": false, "error": public_message(&self.0) });
        (status_code(&self.0), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            status_code(&TalesError::Validation("x".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_code(&TalesError::StoryNotFound("1".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(status_code(&TalesError::Unauthorized), StatusCode::FORBIDDEN);
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        assert_eq!(
            status_code(&TalesError::Io(io)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_public_messages() {
        assert_eq!(
            public_message(&TalesError::StoryNotFound("abc".to_string())),
            "Story not found"
        );
        assert_eq!(
            public_message(&TalesError::Unauthorized),
            "Unauthorized admin access"
        );
        let io = std::io::Error::new(std::io::ErrorKind::Other, "/secret/path");
        assert_eq!(public_message(&TalesError::Io(io)), SAVE_FAILED);
    }

    #[test]
    fn test_error_statuses_survive_into_response() {
        let response = LibraryError(TalesError::Unauthorized).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response =
            CapsuleError(TalesError::Validation("Message is required".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
