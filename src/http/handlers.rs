use super::error::ApiError;
use super::AppState;
use crate::core::logging::{log_from_frontend, FrontendLog};
use crate::shared::errors::StoreError;
use crate::todos::types::{
    CreateTodoRequest, EditTodoRequest, SetCompletedRequest, Task, TodoSummary,
};
use crate::todos::TodoStore;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;

/// Runs a store operation on the blocking pool; the store does synchronous file I/O.
async fn with_store<T, F>(state: &AppState, op: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&TodoStore) -> Result<T, StoreError> + Send + 'static,
{
    let store = Arc::clone(&state.store);
    tokio::task::spawn_blocking(move || op(&store))
        .await
        .map_err(|e| {
            tracing::error!(target: "http", error = %e, "Store task did not complete");
            ApiError::internal("Internal server error")
        })?
        .map_err(ApiError::from)
}

/// Path indices are signed so `-1` is an unknown todo rather than a bad route.
/// Anything that is not an integer is an unknown todo as well.
pub(crate) fn parse_index(raw: &str) -> Result<i64, ApiError> {
    raw.trim().parse::<i64>().map_err(|_| ApiError::not_found())
}

fn required_text(text: Option<String>) -> Result<String, ApiError> {
    text.filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Todo text is required"))
}

pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = with_store(&state, |store| store.load_all()).await?;
    Ok(Json(tasks))
}

pub async fn todos_summary(State(state): State<AppState>) -> Result<Json<TodoSummary>, ApiError> {
    let summary = with_store(&state, |store| store.summary()).await?;
    Ok(Json(summary))
}

pub async fn create_todo(
    State(state): State<AppState>,
    body: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<(StatusCode, &'static str), ApiError> {
    let Json(req) = body?;
    let text = required_text(req.todo)?;

    with_store(&state, move |store| store.add(&text)).await?;
    Ok((StatusCode::CREATED, "Todo added"))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    Path(raw_index): Path<String>,
) -> Result<&'static str, ApiError> {
    let index = parse_index(&raw_index)?;

    with_store(&state, move |store| store.set_deleted(index, true)).await?;
    Ok("Todo deleted")
}

pub async fn restore_todo(
    State(state): State<AppState>,
    Path(raw_index): Path<String>,
) -> Result<&'static str, ApiError> {
    let index = parse_index(&raw_index)?;

    with_store(&state, move |store| store.set_deleted(index, false)).await?;
    Ok("Todo restored")
}

pub async fn set_todo_completed(
    State(state): State<AppState>,
    Path(raw_index): Path<String>,
    body: Result<Json<SetCompletedRequest>, JsonRejection>,
) -> Result<&'static str, ApiError> {
    let index = parse_index(&raw_index)?;
    let Json(req) = body?;

    with_store(&state, move |store| store.set_completed(index, req.completed)).await?;
    Ok("Todo updated")
}

pub async fn edit_todo(
    State(state): State<AppState>,
    Path(raw_index): Path<String>,
    body: Result<Json<EditTodoRequest>, JsonRejection>,
) -> Result<&'static str, ApiError> {
    // Text is checked before the index, so an empty edit is a 400 even for a missing todo.
    let Json(req) = body?;
    let text = required_text(req.text)?;
    let index = parse_index(&raw_index)?;

    with_store(&state, move |store| store.set_text(index, &text)).await?;
    Ok("Todo updated")
}

pub async fn frontend_log(
    body: Result<Json<FrontendLog>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(entry) = body?;
    log_from_frontend(&entry);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn healthz() -> &'static str {
    "ok"
}
