//! # Domain Layer
//!
//! The domain layer contains the core business types of the todo service.
//! It is independent of any external frameworks or infrastructure concerns.
//!
//! ## Structure
//!
//! - **entities**: The `Todo` entity and its repository trait
//! - **value_objects**: Lookup criteria and list-query parameters
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Repository traits define data access contracts
//! - Every read goes to storage; nothing is cached in-process

pub mod entities;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use value_objects::*;
