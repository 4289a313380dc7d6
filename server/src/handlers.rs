//! Route handlers for the `/todos` resource.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::error::ApiError;
use crate::todo::{Todo, TodoPayload};
use crate::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/todos",
            get(list_todos).post(create_todo).delete(delete_all_todos),
        )
        .route(
            "/todos/{id}",
            get(get_todo).patch(update_todo).delete(delete_todo),
        )
        .with_state(state)
}

async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = state.repository.find_all().await?;
    Ok(Json(todos))
}

async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, ApiError> {
    find_existing(&state, id).await.map(Json)
}

async fn create_todo(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<TodoPayload>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    let todo = state.repository.save(payload.into_new_todo()?).await?;
    let id = todo.id.clone().unwrap_or_default();
    tracing::info!(%id, title = %todo.title, "todo created");

    let location = location_for(&headers, &id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(todo),
    ))
}

async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<TodoPayload>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let mut todo = find_existing(&state, id).await?;
    let Json(patch) = payload?;
    todo.apply(patch);
    let todo = state.repository.save(todo).await?;
    tracing::debug!(id = todo.id.as_deref().unwrap_or_default(), "todo updated");
    Ok(Json(todo))
}

async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let todo = find_existing(&state, id).await?;
    if let Some(id) = todo.id.as_deref() {
        state.repository.delete_by_id(id).await?;
        tracing::info!(%id, "todo deleted");
    }
    Ok(StatusCode::OK)
}

async fn delete_all_todos(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state.repository.delete_all().await?;
    tracing::info!("all todos deleted");
    Ok(StatusCode::OK)
}

async fn find_existing(state: &AppState, id: String) -> Result<Todo, ApiError> {
    state
        .repository
        .find_by_id(&id)
        .await?
        .ok_or(ApiError::NotFound(id))
}

/// Absolute URL of the todo when the request named its host, else a path.
fn location_for(headers: &HeaderMap, id: &str) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok());
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("http");
    match host {
        Some(host) => format!("{scheme}://{host}/todos/{id}"),
        None => format!("/todos/{id}"),
    }
}
