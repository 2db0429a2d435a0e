//! JSON read API for the presentation layer.
//!
//! Everything served here has already crossed the gateway boundary and is
//! sanitized; handlers never re-validate it.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::board::{Task, TaskStatus};
use crate::gateway::AppContext;
use crate::http::server::AppState;

/// Body of `GET /context`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ContextResponse {
    pub context: Option<AppContext>,
    /// Most recent advisory warnings, oldest first.
    pub warnings: Vec<String>,
}

/// Body of `POST /tasks/{id}/status`.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: TaskStatus,
}

pub async fn context_handler(State(state): State<AppState>) -> Json<ContextResponse> {
    Json(ContextResponse {
        context: state.dashboard.context(),
        warnings: state.gateway.warnings().recent(),
    })
}

pub async fn tasks_handler(State(state): State<AppState>) -> Json<Vec<Task>> {
    Json(state.dashboard.tasks())
}

pub async fn add_task_handler(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::CREATED, Json(state.dashboard.add_custom_task()))
}

pub async fn update_status_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<StatusUpdate>,
) -> StatusCode {
    if state.dashboard.update_status(&id, update.status) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

pub async fn health_handler() -> &'static str {
    "OK"
}
