//! # Domain Value Objects
//!
//! Immutable value types that represent domain concepts without identity.
//!
//! - **TodoCriterion**: unique lookup key (id or title)
//! - **TodoQuery**: skip/take/cursor/filter/order parameters for listing

mod todo_query;

pub use todo_query::*;
