//! Todo Handlers
//!
//! Map HTTP calls onto [`TodoService`] operations. No business logic lives
//! here beyond translating service errors into HTTP errors.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::application::dto::{CreateTodoRequest, TodoResponse, UpdateTodoRequest};
use crate::application::services::{TodoError, TodoService, TodoServiceImpl};
use crate::domain::{TodoCriterion, TodoQuery, TodoRepository};
use crate::presentation::http::extractors::{TodoIdPath, ValidatedJson};
use crate::shared::error::AppError;
use crate::startup::AppState;

impl From<TodoError> for AppError {
    fn from(error: TodoError) -> Self {
        match error {
            TodoError::NotFound => AppError::NotFound(error.to_string()),
            TodoError::DuplicateTitle => AppError::BadRequest(error.to_string()),
            TodoError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

fn todo_service(state: &AppState) -> TodoServiceImpl<dyn TodoRepository> {
    TodoServiceImpl::new(state.todo_repo.clone())
}

/// Create a new todo
pub async fn create_todo(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateTodoRequest>,
) -> Result<(StatusCode, Json<TodoResponse>), AppError> {
    let todo = todo_service(&state).create_todo(body.into()).await?;

    Ok((StatusCode::CREATED, Json(TodoResponse::from(todo))))
}

/// List all todos
pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<TodoResponse>>, AppError> {
    let todos = todo_service(&state)
        .get_todos(&TodoQuery::default())
        .await?;

    Ok(Json(todos.into_iter().map(TodoResponse::from).collect()))
}

/// Get todo by ID
pub async fn get_todo(
    State(state): State<AppState>,
    TodoIdPath(id): TodoIdPath,
) -> Result<Json<TodoResponse>, AppError> {
    let todo = todo_service(&state)
        .get_todo(&TodoCriterion::Id(id))
        .await?;

    Ok(Json(TodoResponse::from(todo)))
}

/// Update todo
pub async fn update_todo(
    State(state): State<AppState>,
    TodoIdPath(id): TodoIdPath,
    ValidatedJson(body): ValidatedJson<UpdateTodoRequest>,
) -> Result<Json<TodoResponse>, AppError> {
    let todo = todo_service(&state)
        .update_todo(&TodoCriterion::Id(id), body.into())
        .await?;

    Ok(Json(TodoResponse::from(todo)))
}

/// Delete todo
pub async fn delete_todo(
    State(state): State<AppState>,
    TodoIdPath(id): TodoIdPath,
) -> Result<StatusCode, AppError> {
    todo_service(&state)
        .delete_todo(&TodoCriterion::Id(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
