//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **TodoService**: Todo CRUD with the title uniqueness rule

pub mod todo_service;

pub use todo_service::{TodoError, TodoService, TodoServiceImpl};
