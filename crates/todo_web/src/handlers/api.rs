//! JSON surface under `/api`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use log::info;
use serde::{Deserialize, Serialize};
use todo_core::Todo;

use super::parse_path_id;
use crate::error::ApiError;
use crate::state::AppState;
use crate::subtasks::{generate_subtasks, FanOutReport};

#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTodoRequest {
    pub completed: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: todo_core::core_version(),
    })
}

/// `GET /api/todos`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, ApiError> {
    Ok(Json(state.store.list().await?))
}

/// `POST /api/todos`
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let Json(request) =
        payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let todo = state.store.create(request.text).await?;
    info!("event=todo_create module=api status=ok id={}", todo.id);
    Ok((StatusCode::CREATED, Json(todo)))
}

/// `PATCH /api/todos/{id}`
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let id = parse_path_id(&raw_id)?;
    let Json(request) =
        payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let todo = state.store.set_completed(id, request.completed).await?;
    info!(
        "event=todo_update module=api status=ok id={} completed={}",
        todo.id, todo.completed
    );
    Ok(Json(todo))
}

/// `DELETE /api/todos/{id}`
pub async fn delete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_path_id(&raw_id)?;
    state.store.delete(id).await?;
    info!("event=todo_delete module=api status=ok id={id}");
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/todos/{id}/subtasks`
pub async fn generate(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<FanOutReport>, ApiError> {
    let id = parse_path_id(&raw_id)?;
    let parent = state
        .store
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("todo not found: {id}")))?;
    let report = generate_subtasks(&state.store, state.completion.as_ref(), &parent).await?;
    Ok(Json(report))
}
