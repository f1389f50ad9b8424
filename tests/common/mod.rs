//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure.

use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::Utc;
use parking_lot::Mutex;

use todo_api::domain::{NewTodo, Todo, TodoChanges, TodoCriterion, TodoQuery, TodoRepository};
use todo_api::presentation::http::routes::create_router;
use todo_api::shared::error::AppError;
use todo_api::startup::AppState;

#[derive(Default)]
struct Store {
    next_id: i64,
    rows: Vec<Todo>,
}

/// In-memory repository with the same uniqueness guarantee as the
/// `todos_title_key` constraint.
#[derive(Default)]
pub struct InMemoryTodoRepository {
    store: Mutex<Store>,
    offline: bool,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository whose every call fails, as if the database were down.
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    fn check_online(&self) -> Result<(), AppError> {
        if self.offline {
            return Err(AppError::Internal("database unreachable".into()));
        }
        Ok(())
    }
}

fn title_conflict() -> AppError {
    AppError::Conflict("Todo with this title already exists".into())
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn find_one(&self, criterion: &TodoCriterion) -> Result<Option<Todo>, AppError> {
        self.check_online()?;
        let store = self.store.lock();
        Ok(store.rows.iter().find(|t| criterion.matches(t)).cloned())
    }

    async fn find_many(&self, query: &TodoQuery) -> Result<Vec<Todo>, AppError> {
        self.check_online()?;
        let store = self.store.lock();
        Ok(query.apply(&store.rows))
    }

    async fn create(&self, todo: &NewTodo) -> Result<Todo, AppError> {
        self.check_online()?;
        let mut store = self.store.lock();
        if store.rows.iter().any(|t| t.title == todo.title) {
            return Err(title_conflict());
        }

        store.next_id += 1;
        let now = Utc::now();
        let created = Todo {
            id: store.next_id,
            title: todo.title.clone(),
            description: todo.description.clone(),
            completed: false,
            created_at: now,
            updated_at: now,
        };
        store.rows.push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        criterion: &TodoCriterion,
        changes: &TodoChanges,
    ) -> Result<Option<Todo>, AppError> {
        self.check_online()?;
        let mut store = self.store.lock();
        let Some(index) = store.rows.iter().position(|t| criterion.matches(t)) else {
            return Ok(None);
        };

        if let Some(title) = &changes.title {
            let id = store.rows[index].id;
            if store.rows.iter().any(|t| t.id != id && t.title == *title) {
                return Err(title_conflict());
            }
        }

        let row = &mut store.rows[index];
        row.apply(changes);
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, criterion: &TodoCriterion) -> Result<Option<Todo>, AppError> {
        self.check_online()?;
        let mut store = self.store.lock();
        let index = store.rows.iter().position(|t| criterion.matches(t));
        Ok(index.map(|i| store.rows.remove(i)))
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check_online()
    }
}

/// Test application wired to an in-memory repository
pub struct TestApp {
    pub server: TestServer,
    pub repo: Arc<InMemoryTodoRepository>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_repo(InMemoryTodoRepository::new())
    }

    pub fn with_repo(repo: InMemoryTodoRepository) -> Self {
        let repo = Arc::new(repo);
        let router = create_router(AppState::new(repo.clone()));
        let server = TestServer::new(router).expect("failed to start test server");

        Self { server, repo }
    }
}
