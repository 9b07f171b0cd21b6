//! HTTP handlers: one per route, each a thin shim over [`RoomRegistry`].
//!
//! | Route                          | Registry call | Success          |
//! |--------------------------------|---------------|------------------|
//! | `POST   /rooms`                | `register`    | 204              |
//! | `GET    /rooms`                | `list`        | 200 `[RoomView]` |
//! | `POST   /rooms/{id}/join`      | `join`        | 200 `ConnectionInfo` |
//! | `PUT    /rooms/{id}/heartbeat` | `heartbeat`   | 204              |
//! | `DELETE /rooms/{id}`           | `remove`      | 204              |
//! | `GET    /health`               | `room_count`  | 200              |
//!
//! Request bodies are read as raw bytes and decoded with [`JsonCodec`]
//! instead of axum's `Json` extractor. That way an empty body on create or
//! join is treated as `{}`, and every decode failure comes back as our own
//! `{"error": ...}` payload.

use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{delete, get, post, put};
use rendezvous_protocol::{
    Codec, ConnectionInfo, JoinRequest, JsonCodec, RoomDescriptor, RoomView,
};
use rendezvous_registry::RoomRegistry;
use serde::Serialize;

use crate::RendezvousError;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<RoomRegistry>,
}

/// Builds the API router around a registry.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/rooms", post(create_room).get(list_rooms))
        .route("/rooms/{room_id}", delete(delete_room))
        .route("/rooms/{room_id}/join", post(join_room))
        .route("/rooms/{room_id}/heartbeat", put(heartbeat))
        .route("/health", get(health))
        .with_state(state)
}

#[tracing::instrument(skip_all)]
async fn create_room(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<StatusCode, RendezvousError> {
    let descriptor: RoomDescriptor = JsonCodec.decode_or_default(&body)?;

    // Hashing a password is slow; keep it off the async workers.
    let registry = Arc::clone(&state.registry);
    tokio::task::spawn_blocking(move || registry.register(descriptor)).await??;

    Ok(StatusCode::NO_CONTENT)
}

#[tracing::instrument(skip_all)]
async fn list_rooms(State(state): State<AppState>) -> Result<Json<Vec<RoomView>>, RendezvousError> {
    Ok(Json(state.registry.list()?))
}

#[tracing::instrument(skip(state, body))]
async fn join_room(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
    body: Bytes,
) -> Result<Json<ConnectionInfo>, RendezvousError> {
    let request: JoinRequest = JsonCodec.decode_or_default(&body)?;

    let registry = Arc::clone(&state.registry);
    let info = tokio::task::spawn_blocking(move || {
        registry.join(&room_id, request.password.as_deref())
    })
    .await??;

    Ok(Json(info))
}

#[tracing::instrument(skip(state))]
async fn heartbeat(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<StatusCode, RendezvousError> {
    state.registry.heartbeat(&room_id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[tracing::instrument(skip(state))]
async fn delete_room(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<StatusCode, RendezvousError> {
    state.registry.remove(&room_id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    rooms: usize,
}

async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, RendezvousError> {
    Ok(Json(HealthResponse {
        status: "ok",
        rooms: state.registry.room_count()?,
    }))
}
