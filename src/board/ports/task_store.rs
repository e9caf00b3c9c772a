//! Row-store port for task persistence.

use crate::board::domain::{NewTask, OwnerId, Task, TaskChanges, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Owner restriction applied to reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnerFilter {
    /// Every row, used when the store has no owner column.
    Any,
    /// Rows owned by one identity.
    Owner(OwnerId),
}

impl OwnerFilter {
    /// Returns `true` when `owner` passes the filter.
    #[must_use]
    pub fn admits(&self, owner: Option<&OwnerId>) -> bool {
        match self {
            Self::Any => true,
            Self::Owner(expected) => owner == Some(expected),
        }
    }
}

/// Generic row-store contract over the `tasks` collection.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Inserts a batch of rows in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::DuplicateTask`] when a row identifier already
    /// exists.
    async fn insert_batch(&self, tasks: Vec<NewTask>) -> TaskStoreResult<()>;

    /// Writes the set fields of `changes` to the row `id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the row does not exist.
    async fn update(&self, id: TaskId, changes: TaskChanges) -> TaskStoreResult<()>;

    /// Deletes the row `id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the row does not exist.
    async fn delete(&self, id: TaskId) -> TaskStoreResult<()>;

    /// Returns every row passing `filter`, oldest first.
    async fn select_all(&self, filter: OwnerFilter) -> TaskStoreResult<Vec<Task>>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// A row with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The row was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
