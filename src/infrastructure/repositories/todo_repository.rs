//! Todo Repository Implementation
//!
//! PostgreSQL implementation of the TodoRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::domain::{
    NewTodo, SortDirection, Todo, TodoChanges, TodoCriterion, TodoOrderField, TodoQuery,
    TodoRepository,
};
use crate::shared::error::AppError;

const TODO_COLUMNS: &str = "id, title, description, completed, created_at, updated_at";

/// Database row representation matching the todos table schema.
#[derive(Debug, sqlx::FromRow)]
struct TodoRow {
    id: i64,
    title: String,
    description: Option<String>,
    completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TodoRow {
    fn into_todo(self) -> Todo {
        Todo {
            id: self.id,
            title: self.title,
            description: self.description,
            completed: self.completed,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Append `column = $n` for a unique criterion.
fn push_criterion(builder: &mut QueryBuilder<'_, Postgres>, criterion: &TodoCriterion) {
    match criterion {
        TodoCriterion::Id(id) => {
            builder.push("id = ").push_bind(*id);
        }
        TodoCriterion::Title(title) => {
            builder.push("title = ").push_bind(title.clone());
        }
    }
}

/// Map a unique-constraint violation on insert/update to a conflict.
fn map_write_error(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("Todo with this title already exists".to_string())
        }
        _ => AppError::Database(e),
    }
}

/// PostgreSQL todo repository implementation.
#[derive(Clone)]
pub struct PgTodoRepository {
    pool: PgPool,
}

impl PgTodoRepository {
    /// Create a new PgTodoRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build the list query. Keyset on `(order column, id)` implements the
    /// inclusive cursor; the caller has already resolved the cursor row.
    fn build_list_query<'a>(query: &'a TodoQuery, cursor: Option<&'a Todo>) -> QueryBuilder<'a, Postgres> {
        let mut builder = QueryBuilder::new(format!("SELECT {} FROM todos WHERE 1=1", TODO_COLUMNS));

        if let Some(needle) = &query.filter.title_contains {
            builder
                .push(" AND title ILIKE ")
                .push_bind(format!("%{}%", escape_like(needle)));
        }
        if let Some(completed) = query.filter.completed {
            builder.push(" AND completed = ").push_bind(completed);
        }

        let order = query.order_by;
        let column = order.field.column();
        let direction = order.direction.as_sql();

        if let Some(cursor) = cursor {
            let op = match order.direction {
                SortDirection::Asc => ">=",
                SortDirection::Desc => "<=",
            };
            match order.field {
                TodoOrderField::Id => {
                    builder.push(format!(" AND id {} ", op)).push_bind(cursor.id);
                }
                TodoOrderField::Title => {
                    builder
                        .push(format!(" AND (title, id) {} (", op))
                        .push_bind(cursor.title.as_str())
                        .push(", ")
                        .push_bind(cursor.id)
                        .push(")");
                }
                TodoOrderField::CreatedAt => {
                    builder
                        .push(format!(" AND (created_at, id) {} (", op))
                        .push_bind(cursor.created_at)
                        .push(", ")
                        .push_bind(cursor.id)
                        .push(")");
                }
                TodoOrderField::UpdatedAt => {
                    builder
                        .push(format!(" AND (updated_at, id) {} (", op))
                        .push_bind(cursor.updated_at)
                        .push(", ")
                        .push_bind(cursor.id)
                        .push(")");
                }
            }
        }

        if order.field == TodoOrderField::Id {
            builder.push(format!(" ORDER BY id {}", direction));
        } else {
            builder.push(format!(" ORDER BY {} {}, id {}", column, direction, direction));
        }

        if let Some(take) = query.take {
            builder.push(" LIMIT ").push_bind(i64::from(take));
        }
        if let Some(skip) = query.skip {
            builder.push(" OFFSET ").push_bind(i64::from(skip));
        }

        builder
    }
}

/// Escape LIKE wildcards so the filter is a plain substring match.
fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[async_trait]
impl TodoRepository for PgTodoRepository {
    /// Find a todo by id or title.
    async fn find_one(&self, criterion: &TodoCriterion) -> Result<Option<Todo>, AppError> {
        let mut builder = QueryBuilder::new(format!("SELECT {} FROM todos WHERE ", TODO_COLUMNS));
        push_criterion(&mut builder, criterion);

        let row = builder
            .build_query_as::<TodoRow>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(TodoRow::into_todo))
    }

    /// List todos with filtering, ordering and cursor/offset pagination.
    async fn find_many(&self, query: &TodoQuery) -> Result<Vec<Todo>, AppError> {
        let cursor = match &query.cursor {
            Some(criterion) => match self.find_one(criterion).await? {
                Some(todo) => Some(todo),
                None => return Ok(Vec::new()),
            },
            None => None,
        };

        let mut builder = Self::build_list_query(query, cursor.as_ref());
        let rows = builder
            .build_query_as::<TodoRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(TodoRow::into_todo).collect())
    }

    /// Insert a new todo; `completed` and timestamps take their column defaults.
    async fn create(&self, todo: &NewTodo) -> Result<Todo, AppError> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            INSERT INTO todos (title, description)
            VALUES ($1, $2)
            RETURNING id, title, description, completed, created_at, updated_at
            "#,
        )
        .bind(&todo.title)
        .bind(&todo.description)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(row.into_todo())
    }

    /// Apply a partial update.
    async fn update(
        &self,
        criterion: &TodoCriterion,
        changes: &TodoChanges,
    ) -> Result<Option<Todo>, AppError> {
        let mut builder = QueryBuilder::new("UPDATE todos SET title = COALESCE(");
        builder
            .push_bind(changes.title.clone())
            .push(", title), description = CASE WHEN ")
            .push_bind(changes.description.is_some())
            .push(" THEN ")
            .push_bind(changes.description.clone().flatten())
            .push(" ELSE description END, completed = COALESCE(")
            .push_bind(changes.completed)
            .push(", completed), updated_at = NOW() WHERE ");
        push_criterion(&mut builder, criterion);
        builder.push(format!(" RETURNING {}", TODO_COLUMNS));

        let row = builder
            .build_query_as::<TodoRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_write_error)?;

        Ok(row.map(TodoRow::into_todo))
    }

    /// Delete a todo and return the removed row.
    async fn delete(&self, criterion: &TodoCriterion) -> Result<Option<Todo>, AppError> {
        let mut builder = QueryBuilder::new("DELETE FROM todos WHERE ");
        push_criterion(&mut builder, criterion);
        builder.push(format!(" RETURNING {}", TODO_COLUMNS));

        let row = builder
            .build_query_as::<TodoRow>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(TodoRow::into_todo))
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
