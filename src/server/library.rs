//! File-backed library site: HTML pages, public JSON reads, admin writes.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, Request, State};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::middleware::{self, Next};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tower_http::trace::TraceLayer;
use tracing::warn;

use super::error::{LibraryError, STORY_NOT_FOUND};
use super::pages;
use super::LibraryState;
use crate::entity::{Story, StoryId};
use crate::error::TalesError;
use crate::reader;
use crate::service::NewStory;

pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

#[derive(Debug, Default, Deserialize)]
struct AdminQuery {
    #[serde(rename = "adminKey")]
    admin_key: Option<String>,
}

pub fn library_router(state: LibraryState) -> Router {
    let admin = Router::new()
        .route("/admin", get(admin_page))
        .route("/api/admin/stories", post(create_story))
        .route(
            "/api/admin/stories/{id}",
            put(update_story).delete(delete_story),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .route("/", get(landing))
        .route("/play/{story_id}", get(play))
        .route("/stories", get(gallery))
        .route("/api/stories", get(list_stories))
        .route("/api/stories/{id}", get(get_story))
        .merge(admin)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The admin key a request presents: the `x-admin-key` header, or the
/// `adminKey` query parameter when the header is missing or empty.
pub fn presented_key(headers: &HeaderMap, uri: &Uri) -> Option<String> {
    let header = headers
        .get(ADMIN_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty());

    match header {
        Some(key) => Some(key.to_string()),
        None => Query::<AdminQuery>::try_from_uri(uri)
            .ok()
            .and_then(|Query(query)| query.admin_key),
    }
}

async fn require_admin(
    State(state): State<LibraryState>,
    request: Request,
    next: Next,
) -> Result<Response, LibraryError> {
    let key = presented_key(request.headers(), request.uri());
    if !state.authorizer.authorize(key.as_deref()) {
        warn!(path = %request.uri().path(), "rejected admin request");
        return Err(TalesError::Unauthorized.into());
    }
    Ok(next.run(request).await)
}

/// Library ids are integers; anything else names no story.
fn library_id(raw: &str) -> Result<StoryId, TalesError> {
    StoryId::number(raw).ok_or_else(|| TalesError::StoryNotFound(raw.to_string()))
}

async fn landing() -> Html<String> {
    Html(pages::landing())
}

async fn play(State(state): State<LibraryState>, Path(story_id): Path<String>) -> Response {
    let service = state.service.lock().await;
    let story = library_id(&story_id).and_then(|id| service.get(&id));

    match story {
        Ok(story) => {
            let sentences = reader::sentences(story.text());
            Html(pages::reader(&story, &sentences)).into_response()
        }
        Err(_) => (StatusCode::NOT_FOUND, STORY_NOT_FOUND).into_response(),
    }
}

async fn gallery(State(state): State<LibraryState>) -> Html<String> {
    let stories = state.service.lock().await.list();
    Html(pages::gallery(&stories))
}

async fn list_stories(State(state): State<LibraryState>) -> Json<Vec<Story>> {
    Json(state.service.lock().await.list())
}

async fn get_story(
    State(state): State<LibraryState>,
    Path(id): Path<String>,
) -> Result<Json<Story>, LibraryError> {
    let id = library_id(&id)?;
    let story = state.service.lock().await.get(&id)?;
    Ok(Json(story))
}

async fn admin_page(
    State(state): State<LibraryState>,
    headers: HeaderMap,
    uri: Uri,
) -> Html<String> {
    let key = presented_key(&headers, &uri).unwrap_or_default();
    let stories = state.service.lock().await.list();
    Html(pages::admin(&stories, &key))
}

async fn create_story(
    State(state): State<LibraryState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Story>), LibraryError> {
    // An absent or unparsable body is an empty one: every field is missing.
    let value = body.map(|Json(v)| v).unwrap_or_else(|_| json!({}));
    let new: NewStory = serde_json::from_value(value)
        .map_err(|e| TalesError::Validation(format!("Invalid story: {}", e)))?;

    let story = state.service.lock().await.create(new)?;
    Ok((StatusCode::CREATED, Json(story)))
}

async fn update_story(
    State(state): State<LibraryState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Story>, LibraryError> {
    let id = library_id(&id)?;
    let fields = match body {
        Ok(Json(Value::Object(fields))) => fields,
        Ok(Json(_)) => {
            return Err(TalesError::Validation(
                "Story fields must be a JSON object".to_string(),
            )
            .into())
        }
        Err(_) => Map::new(),
    };

    let story = state.service.lock().await.update(&id, fields)?;
    Ok(Json(story))
}

async fn delete_story(
    State(state): State<LibraryState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, LibraryError> {
    let id = library_id(&id)?;
    state.service.lock().await.delete(&id)?;
    Ok(Json(json!({ "message": "Story deleted" })))
}
