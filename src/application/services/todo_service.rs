//! Todo Service
//!
//! Enforces title uniqueness and existence checks; everything else is
//! passed through to the repository.
//!
//! The duplicate-title check is a pre-check for fast feedback only. The
//! unique constraint on `todos.title` is what actually rules out races; a
//! constraint violation surfacing from the repository is reported as
//! [`TodoError::DuplicateTitle`] as well.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{NewTodo, Todo, TodoChanges, TodoCriterion, TodoQuery, TodoRepository};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

/// Todo service trait
#[async_trait]
pub trait TodoService: Send + Sync {
    /// Create a todo; fails if the title is taken
    async fn create_todo(&self, data: NewTodo) -> Result<Todo, TodoError>;

    /// Get the todo matching a unique criterion
    async fn get_todo(&self, criterion: &TodoCriterion) -> Result<Todo, TodoError>;

    /// List todos
    async fn get_todos(&self, query: &TodoQuery) -> Result<Vec<Todo>, TodoError>;

    /// Apply a partial update to an existing todo
    async fn update_todo(
        &self,
        criterion: &TodoCriterion,
        changes: TodoChanges,
    ) -> Result<Todo, TodoError>;

    /// Delete an existing todo, returning its prior state
    async fn delete_todo(&self, criterion: &TodoCriterion) -> Result<Todo, TodoError>;
}

/// Todo service errors
#[derive(Debug, thiserror::Error)]
pub enum TodoError {
    #[error("Todo not found.")]
    NotFound,

    #[error("Todo exists")]
    DuplicateTitle,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TodoError {
    fn outcome(&self) -> &'static str {
        match self {
            TodoError::NotFound => "not_found",
            TodoError::DuplicateTitle => "duplicate_title",
            TodoError::Internal(_) => "error",
        }
    }
}

impl From<AppError> for TodoError {
    fn from(error: AppError) -> Self {
        match error {
            AppError::Conflict(_) => TodoError::DuplicateTitle,
            AppError::NotFound(_) => TodoError::NotFound,
            e => TodoError::Internal(e.to_string()),
        }
    }
}

/// TodoService implementation
pub struct TodoServiceImpl<R>
where
    R: TodoRepository + ?Sized,
{
    todo_repo: Arc<R>,
}

impl<R> TodoServiceImpl<R>
where
    R: TodoRepository + ?Sized,
{
    pub fn new(todo_repo: Arc<R>) -> Self {
        Self { todo_repo }
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Todo>, TodoError> {
        Ok(self
            .todo_repo
            .find_one(&TodoCriterion::Title(title.to_string()))
            .await?)
    }

    async fn create(&self, data: NewTodo) -> Result<Todo, TodoError> {
        if self.find_by_title(&data.title).await?.is_some() {
            return Err(TodoError::DuplicateTitle);
        }

        Ok(self.todo_repo.create(&data).await?)
    }

    async fn update(&self, criterion: &TodoCriterion, changes: TodoChanges) -> Result<Todo, TodoError> {
        let current = self.get(criterion).await?;

        let title = changes.new_title().map(str::to_owned);
        if let Some(title) = &title {
            // Keeping one's own title is not a collision
            if let Some(owner) = self.find_by_title(title).await? {
                if owner.id != current.id {
                    return Err(TodoError::DuplicateTitle);
                }
            }
        }

        let changes = TodoChanges { title, ..changes };
        if changes.is_empty() {
            return Ok(current);
        }

        self.todo_repo
            .update(&TodoCriterion::Id(current.id), &changes)
            .await?
            .ok_or(TodoError::NotFound)
    }

    async fn get(&self, criterion: &TodoCriterion) -> Result<Todo, TodoError> {
        self.todo_repo
            .find_one(criterion)
            .await?
            .ok_or(TodoError::NotFound)
    }

    async fn delete(&self, criterion: &TodoCriterion) -> Result<Todo, TodoError> {
        let current = self.get(criterion).await?;

        self.todo_repo
            .delete(&TodoCriterion::Id(current.id))
            .await?
            .ok_or(TodoError::NotFound)
    }
}

/// Log and count the outcome of a service operation.
fn observe<T>(operation: &'static str, result: Result<T, TodoError>) -> Result<T, TodoError> {
    match &result {
        Ok(_) => {
            tracing::debug!(operation, "todo operation succeeded");
            metrics::record_todo_operation(operation, "ok");
        }
        Err(TodoError::Internal(e)) => {
            tracing::error!(operation, error = %e, "todo operation failed");
            metrics::record_todo_operation(operation, "error");
        }
        Err(e) => {
            tracing::warn!(operation, error = %e, "todo operation rejected");
            metrics::record_todo_operation(operation, e.outcome());
        }
    }
    result
}

#[async_trait]
impl<R> TodoService for TodoServiceImpl<R>
where
    R: TodoRepository + ?Sized + 'static,
{
    async fn create_todo(&self, data: NewTodo) -> Result<Todo, TodoError> {
        observe("create", self.create(data).await)
    }

    async fn get_todo(&self, criterion: &TodoCriterion) -> Result<Todo, TodoError> {
        observe("get", self.get(criterion).await)
    }

    async fn get_todos(&self, query: &TodoQuery) -> Result<Vec<Todo>, TodoError> {
        let result = self.todo_repo.find_many(query).await.map_err(TodoError::from);
        observe("list", result)
    }

    async fn update_todo(
        &self,
        criterion: &TodoCriterion,
        changes: TodoChanges,
    ) -> Result<Todo, TodoError> {
        observe("update", self.update(criterion, changes).await)
    }

    async fn delete_todo(&self, criterion: &TodoCriterion) -> Result<Todo, TodoError> {
        observe("delete", self.delete(criterion).await)
    }
}
