//! Todo entity and repository trait.
//!
//! Maps to the `todos` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{TodoCriterion, TodoQuery};
use crate::shared::error::AppError;

/// Represents a single todo item.
///
/// Maps to the `todos` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - title: TEXT NOT NULL UNIQUE
/// - description: TEXT NULL
/// - completed: BOOLEAN NOT NULL DEFAULT FALSE
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - updated_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Database-assigned identifier
    pub id: i64,

    /// Title, unique across all todos
    pub title: String,

    /// Free-form description
    pub description: Option<String>,

    /// Completion flag
    pub completed: bool,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Apply a partial update in place, leaving absent fields untouched.
    pub fn apply(&mut self, changes: &TodoChanges) {
        if let Some(title) = &changes.title {
            self.title = title.clone();
        }
        if let Some(description) = &changes.description {
            self.description = description.clone();
        }
        if let Some(completed) = changes.completed {
            self.completed = completed;
        }
    }
}

/// Fields supplied when inserting a todo. Everything else is storage-assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
}

/// Partial update. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoChanges {
    pub title: Option<String>,
    /// `Some(None)` clears the description
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
}

impl TodoChanges {
    /// The new title, if one was given and it is not empty.
    pub fn new_title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }

    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }
}

/// Repository trait for Todo data access operations.
///
/// Implementations must enforce title uniqueness themselves (a unique
/// constraint at the schema level) and report a violation as
/// [`AppError::Conflict`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Find the single todo matching a unique criterion.
    async fn find_one(&self, criterion: &TodoCriterion) -> Result<Option<Todo>, AppError>;

    /// Find todos honoring skip, take, cursor, filter and ordering.
    async fn find_many(&self, query: &TodoQuery) -> Result<Vec<Todo>, AppError>;

    /// Insert a new todo.
    async fn create(&self, todo: &NewTodo) -> Result<Todo, AppError>;

    /// Apply a partial update. Returns `None` when nothing matched.
    async fn update(
        &self,
        criterion: &TodoCriterion,
        changes: &TodoChanges,
    ) -> Result<Option<Todo>, AppError>;

    /// Remove a todo, returning its prior state. Returns `None` when nothing matched.
    async fn delete(&self, criterion: &TodoCriterion) -> Result<Option<Todo>, AppError>;

    /// Round-trip to the backing store.
    async fn ping(&self) -> Result<(), AppError>;
}
