//! In-memory story capsule API.
//!
//! Every response is wrapped in a `success` envelope. Advancing a completed
//! capsule is reported as `success: false` with HTTP 200.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use super::error::CapsuleError;
use super::CapsuleState;
use crate::entity::{Story, StoryId, StoryStatus};

#[derive(Debug, Default, Deserialize)]
struct DraftBody {
    message: Option<String>,
}

pub fn capsule_router(state: CapsuleState) -> Router {
    Router::new()
        .route("/", get(describe))
        .route("/stories", get(list_stories))
        .route("/story", post(draft_story))
        .route("/story/{id}", get(get_story))
        .route("/story/{id}/next", post(advance_story))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The capsule every fresh server starts with.
pub fn seed_stories() -> Vec<Story> {
    let message = [
        "You stand at the edge of a dark forest. The moonlight filters through the twisted trees ahead.",
        "A cold wind whispers through the branches, carrying with it the scent of adventure and danger.",
        "You adjust your backpack and take a deep breath.",
        "The forest calls to you, promising secrets and treasures beyond imagination.",
        "You see two paths ahead - one glowing with a faint blue light, the other hidden in shadows.",
        "Your heart races as you realize this is the beginning of an epic journey.",
        "The blue path seems safe but boring, leading toward distant mountains.",
        "The shadow path is mysterious and shrouded in fog, but something draws you toward it.",
        "You remember the ancient map you found in your grandmother's attic.",
        "It mentioned a hidden temple somewhere in this very forest.",
        "The temple is said to contain the legendary Crystal of Eternity.",
        "Many adventurers have searched for it, but none have returned with proof of its existence.",
        "You feel a sense of purpose wash over you as you grip your torch tighter.",
        "The flames flicker and dance, casting dancing shadows on the forest floor.",
        "You take a step forward onto the shadow path, committing yourself to the unknown.",
        "The adventure of a lifetime is about to begin.",
        "Every step deeper into the forest fills you with both excitement and trepidation.",
        "You hear strange sounds - the call of a distant owl, rustling leaves, something else.",
        "Your instincts tell you to press onward, to discover what awaits you in the darkness.",
        "The forest seems to embrace you as you venture deeper into its mysterious depths.",
    ]
    .join("\n");

    let mut story = Story::capsule("adventure-001".to_string(), message);
    story.status = Some(StoryStatus::Online);
    vec![story]
}

async fn describe() -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "Story Capsule Reader API",
        "endpoints": {
            "GET /stories": "List all stories",
            "GET /story/:id": "Read a single story",
            "POST /story": "Create a draft story",
            "POST /story/:id/next": "Move story to next status"
        }
    }))
}

async fn list_stories(State(state): State<CapsuleState>) -> Json<Value> {
    let stories = state.service.lock().await.list();
    Json(json!({ "success": true, "stories": stories }))
}

async fn get_story(
    State(state): State<CapsuleState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, CapsuleError> {
    let story = state.service.lock().await.get(&StoryId::token(id))?;
    Ok(Json(json!({ "success": true, "story": story })))
}

async fn draft_story(
    State(state): State<CapsuleState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, CapsuleError> {
    // Anything that is not an object with a string message counts as no message.
    let message = body
        .ok()
        .and_then(|Json(v)| serde_json::from_value::<DraftBody>(v).ok())
        .and_then(|b| b.message);

    let story = state.service.lock().await.draft(message)?;
    Ok(Json(json!({ "success": true, "story": story })))
}

async fn advance_story(
    State(state): State<CapsuleState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, CapsuleError> {
    let step = state.service.lock().await.advance(&StoryId::token(id))?;
    Ok(Json(json!({
        "success": step.advanced,
        "story": step.story,
        "message": step.message,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::StoryService;
    use crate::storage::MemoryStore;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn setup_app(seeded: bool) -> Router {
        let store = if seeded {
            MemoryStore::seeded(seed_stories())
        } else {
            MemoryStore::new()
        };
        capsule_router(CapsuleState::new(StoryService::new(store)))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_describe() {
        let app = setup_app(false);
        let (status, body) = send(&app, "GET", "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["message"], json!("Story Capsule Reader API"));
        assert!(body["endpoints"]["POST /story/:id/next"].is_string());
    }

    #[tokio::test]
    async fn test_seeded_story_is_listed() {
        let app = setup_app(true);
        let (status, body) = send(&app, "GET", "/stories", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["stories"][0]["id"], json!("adventure-001"));
        assert_eq!(body["stories"][0]["status"], json!("online"));

        let (status, body) = send(&app, "GET", "/story/adventure-001", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["story"]["message"]
            .as_str()
            .unwrap()
            .starts_with("You stand at the edge of a dark forest."));
    }

    #[tokio::test]
    async fn test_draft_then_advance_to_completion() {
        let app = setup_app(false);

        let (status, body) = send(&app, "POST", "/story", Some(json!({"message": "Once."}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["story"]["status"], json!("draft"));
        let id = body["story"]["id"].as_str().unwrap().to_string();
        let next = format!("/story/{}/next", id);

        let (status, body) = send(&app, "POST", &next, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["story"]["status"], json!("online"));
        assert_eq!(body["message"], json!("Story is now online"));

        let (_, body) = send(&app, "POST", &next, None).await;
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["story"]["status"], json!("completed"));
        assert_eq!(body["message"], json!("Story storage completed"));

        let (status, body) = send(&app, "POST", &next, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["story"]["status"], json!("completed"));
        assert_eq!(body["message"], json!("Story already completed"));
    }

    #[tokio::test]
    async fn test_draft_requires_message() {
        let app = setup_app(false);

        for body in [Some(json!({})), Some(json!({"message": ""})), None] {
            let (status, response) = send(&app, "POST", "/story", body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(
                response,
                json!({"success": false, "error": "Message is required"})
            );
        }

        let (_, body) = send(&app, "GET", "/stories", None).await;
        assert_eq!(body["stories"], json!([]));
    }

    #[tokio::test]
    async fn test_unknown_capsule_is_not_found() {
        let app = setup_app(true);

        let (status, body) = send(&app, "GET", "/story/missing", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"success": false, "error": "Story not found"}));

        let (status, _) = send(&app, "POST", "/story/missing/next", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
