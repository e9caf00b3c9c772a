//! `PostgreSQL` adapter for the task row-store.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresTaskStore, TaskPgPool};
