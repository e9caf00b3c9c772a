//! In-memory row-store for task board tests.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{NewTask, Task, TaskChanges, TaskId},
    ports::{OwnerFilter, TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store.
///
/// Rows are kept in insertion order, which doubles as the tie-breaker when
/// creation timestamps are equal.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    rows: Arc<RwLock<Vec<Task>>>,
}

impl InMemoryTaskStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `tasks`.
    #[must_use]
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            rows: Arc::new(RwLock::new(tasks)),
        }
    }
}

fn lock_error(err: impl std::fmt::Display) -> TaskStoreError {
    TaskStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn insert_batch(&self, tasks: Vec<NewTask>) -> TaskStoreResult<()> {
        let mut rows = self.rows.write().map_err(lock_error)?;
        for (index, task) in tasks.iter().enumerate() {
            let duplicate_in_batch = tasks
                .iter()
                .take(index)
                .any(|earlier| earlier.id == task.id);
            if duplicate_in_batch || rows.iter().any(|row| row.id() == task.id) {
                return Err(TaskStoreError::DuplicateTask(task.id));
            }
        }
        rows.extend(tasks.into_iter().map(NewTask::into_task));
        Ok(())
    }

    async fn update(&self, id: TaskId, changes: TaskChanges) -> TaskStoreResult<()> {
        let mut rows = self.rows.write().map_err(lock_error)?;
        let row = rows
            .iter_mut()
            .find(|row| row.id() == id)
            .ok_or(TaskStoreError::NotFound(id))?;
        row.apply(&changes);
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskStoreResult<()> {
        let mut rows = self.rows.write().map_err(lock_error)?;
        let before = rows.len();
        rows.retain(|row| row.id() != id);
        if rows.len() == before {
            return Err(TaskStoreError::NotFound(id));
        }
        Ok(())
    }

    async fn select_all(&self, filter: OwnerFilter) -> TaskStoreResult<Vec<Task>> {
        let rows = self.rows.read().map_err(lock_error)?;
        let mut selected: Vec<Task> = rows
            .iter()
            .filter(|row| filter.admits(row.owner()))
            .cloned()
            .collect();
        selected.sort_by_key(Task::created_at);
        Ok(selected)
    }
}
