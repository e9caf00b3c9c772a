//! In-memory adapters for board tests and demos.

mod task_store;

pub use task_store::InMemoryTaskStore;
