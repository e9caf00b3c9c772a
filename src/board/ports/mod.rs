//! Port contracts for the task board.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod layout;
pub mod task_store;

pub use layout::LayoutSource;
pub use task_store::{OwnerFilter, TaskStore, TaskStoreError, TaskStoreResult};
