//! Routes for walkthrough sessions.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use leasebid_walkthrough::application::query_handlers::{
    self, EventView, WalkthroughView,
};
use leasebid_walkthrough::application::walkthrough::{Walkthrough, WalkthroughSettings};
use leasebid_walkthrough::domain::steps::bid_flow;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /.
#[derive(Debug, Default, Deserialize)]
pub struct CreateWalkthroughRequest {
    /// Overrides the server default for this session.
    #[serde(default)]
    pub auto_advance: Option<bool>,
}

/// Response body for POST /.
#[derive(Debug, Serialize)]
pub struct CreateWalkthroughResponse {
    /// The new session.
    pub session_id: Uuid,
}

/// Request body for POST /{session_id}/navigate.
#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    /// The step to make current.
    pub step: u32,
}

/// Response body for POST /{session_id}/navigate.
#[derive(Debug, Serialize)]
pub struct NavigateResponse {
    /// The current step after the request.
    pub current_step: u32,
    /// Whether the current step changed.
    pub changed: bool,
}

/// Response body for DELETE /{session_id}.
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    /// The removed session.
    pub session_id: Uuid,
}

/// POST /
#[instrument(skip(state, request))]
async fn create_walkthrough(
    State(state): State<AppState>,
    Json(request): Json<CreateWalkthroughRequest>,
) -> Result<Json<CreateWalkthroughResponse>, ApiError> {
    let settings = WalkthroughSettings {
        auto_advance: request.auto_advance.unwrap_or(state.settings.auto_advance),
    };
    let session_id = Uuid::new_v4();
    let walkthrough = Walkthrough::start(
        session_id,
        bid_flow()?,
        Arc::clone(&state.clock),
        settings,
    )?;
    state.walkthroughs.insert(walkthrough);

    info!(%session_id, auto_advance = settings.auto_advance, "created walkthrough");

    Ok(Json(CreateWalkthroughResponse { session_id }))
}

/// GET /{session_id}
#[instrument(skip(state))]
async fn get_walkthrough(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<WalkthroughView>, ApiError> {
    let walkthrough = state.walkthroughs.get(session_id)?;
    Ok(Json(query_handlers::get_walkthrough_view(&walkthrough)))
}

/// GET /{session_id}/events
#[instrument(skip(state))]
async fn get_walkthrough_events(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Vec<EventView>>, ApiError> {
    let walkthrough = state.walkthroughs.get(session_id)?;
    Ok(Json(query_handlers::get_walkthrough_events(&walkthrough)))
}

/// POST /{session_id}/navigate
#[instrument(skip(state, request), fields(step = request.step))]
async fn navigate(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<NavigateRequest>,
) -> Result<Json<NavigateResponse>, ApiError> {
    let walkthrough = state.walkthroughs.get(session_id)?;
    let changed = walkthrough.navigate(request.step)?;

    Ok(Json(NavigateResponse {
        current_step: walkthrough.store().current_step(),
        changed,
    }))
}

/// POST /{session_id}/reset
#[instrument(skip(state))]
async fn reset(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<WalkthroughView>, ApiError> {
    let walkthrough = state.walkthroughs.get(session_id)?;
    walkthrough.reset();
    Ok(Json(query_handlers::get_walkthrough_view(&walkthrough)))
}

/// POST /{session_id}/suspend
#[instrument(skip(state))]
async fn suspend(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<WalkthroughView>, ApiError> {
    let walkthrough = state.walkthroughs.get(session_id)?;
    walkthrough.suspend();
    Ok(Json(query_handlers::get_walkthrough_view(&walkthrough)))
}

/// POST /{session_id}/resume
#[instrument(skip(state))]
async fn resume(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<WalkthroughView>, ApiError> {
    let walkthrough = state.walkthroughs.get(session_id)?;
    walkthrough.resume();
    Ok(Json(query_handlers::get_walkthrough_view(&walkthrough)))
}

/// DELETE /{session_id}
#[instrument(skip(state))]
async fn delete_walkthrough(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, ApiError> {
    state.walkthroughs.remove(session_id)?;
    info!(%session_id, "removed walkthrough");
    Ok(Json(DeletedResponse { session_id }))
}

/// Returns the router for walkthrough sessions.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_walkthrough))
        .route(
            "/{session_id}",
            get(get_walkthrough).delete(delete_walkthrough),
        )
        .route("/{session_id}/events", get(get_walkthrough_events))
        .route("/{session_id}/navigate", post(navigate))
        .route("/{session_id}/reset", post(reset))
        .route("/{session_id}/suspend", post(suspend))
        .route("/{session_id}/resume", post(resume))
}
