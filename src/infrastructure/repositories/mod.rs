//! Repository Implementations
//!
//! PostgreSQL implementations of domain repository traits.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sqlx::PgPool;
//! use todo_api::infrastructure::repositories::PgTodoRepository;
//!
//! fn setup_repositories(pool: PgPool) -> PgTodoRepository {
//!     PgTodoRepository::new(pool)
//! }
//! ```

pub mod todo_repository;

pub use todo_repository::PgTodoRepository;
