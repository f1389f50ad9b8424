//! # Todo API Library
//!
//! This crate provides a CRUD service for todo items with:
//! - RESTful HTTP API endpoints under `/todo`
//! - PostgreSQL for persistent storage
//! - One business rule: todo titles are unique
//!
//! ## Architecture
//!
//! - **Domain Layer**: The `Todo` entity, query types and the repository trait
//! - **Application Layer**: `TodoService` and DTOs
//! - **Infrastructure Layer**: PostgreSQL repository, pool, metrics
//! - **Presentation Layer**: HTTP routes, handlers, extractors and middleware
//!
//! ## Module Structure
//!
//! ```text
//! todo_api/
//! +-- config/         Configuration management
//! +-- domain/         Entity, value objects, repository trait
//! +-- application/    Service and DTOs
//! +-- infrastructure/ Database, repositories, metrics
//! +-- presentation/   HTTP routes and middleware
//! +-- shared/         Errors and validation helpers
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business types
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
