use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use todo_core::Todo;
use tracing::{debug, info};

use crate::error::{ApiError, Result};
use crate::extract::{FieldsBody, TodoIdPath};
use crate::model::{CreatedResponse, MessageResponse};
use crate::response::PrettyJson;
use crate::state::AppState;

pub async fn list_todos_handler(State(state): State<AppState>) -> Result<Response> {
    let todos = state
        .repository()
        .list()
        .await
        .map_err(ApiError::ReadFailed)?;

    if todos.is_empty() {
        return Ok((
            StatusCode::NO_CONTENT,
            PrettyJson(MessageResponse::new("no todos found")),
        )
            .into_response());
    }

    debug!(count = todos.len(), "listed todos");
    Ok(PrettyJson(todos).into_response())
}

pub async fn get_todo_handler(
    TodoIdPath(id): TodoIdPath,
    State(state): State<AppState>,
) -> Result<PrettyJson<Todo>> {
    state
        .repository()
        .get(&id)
        .await
        .map_err(ApiError::ReadFailed)?
        .map(PrettyJson)
        .ok_or(ApiError::NotFound)
}

pub async fn create_todo_handler(
    State(state): State<AppState>,
    FieldsBody(fields): FieldsBody,
) -> Result<(StatusCode, PrettyJson<CreatedResponse>)> {
    let id = state
        .repository()
        .insert(fields)
        .await
        .map_err(ApiError::WriteFailed)?;

    info!(id = %id, "created todo");
    Ok((StatusCode::CREATED, PrettyJson(CreatedResponse { id })))
}

pub async fn update_todo_handler(
    TodoIdPath(id): TodoIdPath,
    State(state): State<AppState>,
    FieldsBody(fields): FieldsBody,
) -> Result<(StatusCode, PrettyJson<MessageResponse>)> {
    let updated = state
        .repository()
        .update(&id, fields)
        .await
        .map_err(ApiError::WriteFailed)?;

    if !updated {
        return Err(ApiError::NotFound);
    }

    info!(id = %id, "updated todo");
    Ok((
        StatusCode::ACCEPTED,
        PrettyJson(MessageResponse::new("Todo updated successfully")),
    ))
}

pub async fn delete_todo_handler(
    TodoIdPath(id): TodoIdPath,
    State(state): State<AppState>,
) -> Result<PrettyJson<MessageResponse>> {
    let deleted = state
        .repository()
        .delete(&id)
        .await
        .map_err(ApiError::WriteFailed)?;

    if !deleted {
        return Err(ApiError::NotFound);
    }

    info!(id = %id, "deleted todo");
    Ok(PrettyJson(MessageResponse::new("Todo deleted successfully")))
}
