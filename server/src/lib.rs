//! REST+JSON binding for the todo service.
//!
//! # Design
//! A thin axum adapter over [`TodoService`]: handlers unwrap the wire shapes,
//! call the service, and wrap results in response envelopes
//! (`{"todo": ...}` / `{"todos": [...], "nextPageToken": ""}`). All business
//! rules live in `todo-core`; this crate only maps payloads and error kinds
//! to HTTP. The service is constructed by the caller and passed in — no
//! process-wide state.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use uuid::Uuid;

use todo_core::{CreateTodo, Todo, TodoPage, TodoService, TodoStore, UpdateTodo};

mod error;

pub use error::ApiError;

/// Response envelope for single-todo operations.
#[derive(Debug, Serialize, Deserialize)]
pub struct TodoEnvelope {
    pub todo: Todo,
}

/// Pagination query parameters, camelCase on the wire.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListQuery {
    #[serde(default)]
    page_size: Option<i32>,
    #[serde(default)]
    page_token: Option<String>,
}

/// Build the router for a service instance.
pub fn app<S>(service: TodoService<S>) -> Router
where
    S: TodoStore + 'static,
{
    Router::new()
        .route("/v1/todos", get(list_todos::<S>).post(create_todo::<S>))
        .route(
            "/v1/todos/{id}",
            get(get_todo::<S>).patch(update_todo::<S>).delete(delete_todo::<S>),
        )
        .with_state(service)
}

/// Serve `app` on an already-bound listener.
pub async fn run<S>(listener: TcpListener, service: TodoService<S>) -> Result<(), std::io::Error>
where
    S: TodoStore + 'static,
{
    axum::serve(listener, app(service)).await
}

async fn create_todo<S: TodoStore + 'static>(
    State(service): State<TodoService<S>>,
    Json(input): Json<CreateTodo>,
) -> Result<(StatusCode, Json<TodoEnvelope>), ApiError> {
    let todo = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(TodoEnvelope { todo })))
}

async fn get_todo<S: TodoStore + 'static>(
    State(service): State<TodoService<S>>,
    Path(id): Path<Uuid>,
) -> Result<Json<TodoEnvelope>, ApiError> {
    let todo = service.get(id).await?;
    Ok(Json(TodoEnvelope { todo }))
}

async fn list_todos<S: TodoStore + 'static>(
    State(service): State<TodoService<S>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<TodoPage>, ApiError> {
    let page = service
        .list(
            query.page_size.unwrap_or(0),
            query.page_token.as_deref().unwrap_or(""),
        )
        .await?;
    Ok(Json(page))
}

async fn update_todo<S: TodoStore + 'static>(
    State(service): State<TodoService<S>>,
    Path(id): Path<Uuid>,
    Json(patch): Json<UpdateTodo>,
) -> Result<Json<TodoEnvelope>, ApiError> {
    let todo = service.update(id, patch).await?;
    Ok(Json(TodoEnvelope { todo }))
}

async fn delete_todo<S: TodoStore + 'static>(
    State(service): State<TodoService<S>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
