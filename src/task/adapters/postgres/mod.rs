//! `PostgreSQL` adapters for task lifecycle persistence.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresTaskRepository, TaskPgPool, apply_schema, build_pool};
