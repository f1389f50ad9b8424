//! # Domain Entities
//!
//! - **Todo**: a task with a unique title, optional description and a
//!   completion flag
//!
//! ## Repository Traits
//!
//! The entity has an associated repository trait defining data access
//! operations. It is implemented in the infrastructure layer, following the
//! dependency inversion principle.

mod todo;

pub use todo::{NewTodo, Todo, TodoChanges, TodoRepository};

#[cfg(test)]
pub use todo::MockTodoRepository;
