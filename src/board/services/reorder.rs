//! Optimistic task reordering with background persistence.
//!
//! A drop is handled in two phases. [`ReorderEngine::reorder_within_group`]
//! and [`ReorderEngine::move_to_group`] swap the new order into the shared
//! [`Board`] synchronously and hand back a [`PersistPlan`]. The plan is then
//! written by [`ReorderEngine::persist`], which reloads the board from the
//! row-store when any write fails.

use super::container::Board;
use super::error::{BoardServiceError, BoardServiceResult, DropOperation};
use crate::board::domain::{
    BoardDomainError, BoardState, GroupLabel, PositionChange, StoreCapabilities, TaskChanges, TaskId,
    TaskReorder,
};
use crate::board::ports::{OwnerFilter, TaskStore, TaskStoreResult};
use futures_util::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of releasing a drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// The pointer was released outside every drop zone, or no drag was
    /// active.
    Ignored,
    /// The drop resolved to the item's current slot.
    Unchanged,
    /// The board changed and nothing remains to be written to the row-store.
    Applied,
    /// The board changed optimistically; the plan still has to be persisted.
    Pending(PersistPlan),
}

/// Row-store writes backing one optimistic drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistPlan {
    operation: DropOperation,
    task_id: TaskId,
    lead: Option<(TaskId, TaskChanges)>,
    followers: Vec<(TaskId, TaskChanges)>,
}

impl PersistPlan {
    /// Returns the kind of drop this plan persists.
    #[must_use]
    pub const fn operation(&self) -> DropOperation {
        self.operation
    }

    /// Returns the dragged task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the number of row updates the plan issues.
    #[must_use]
    pub fn update_count(&self) -> usize {
        usize::from(self.lead.is_some()) + self.followers.len()
    }

    /// Returns every update in issue order.
    pub fn updates(&self) -> impl Iterator<Item = &(TaskId, TaskChanges)> {
        self.lead.iter().chain(self.followers.iter())
    }
}

fn position_updates(changes: &[PositionChange]) -> impl Iterator<Item = (TaskId, TaskChanges)> {
    changes.iter().map(|change| {
        (
            change.task_id,
            TaskChanges::new().with_position(change.position),
        )
    })
}

/// Applies task drops to the board and persists them.
#[derive(Debug)]
pub struct ReorderEngine<S>
where
    S: TaskStore,
{
    store: Arc<S>,
    board: Board,
    filter: OwnerFilter,
    capabilities: StoreCapabilities,
}

impl<S> Clone for ReorderEngine<S>
where
    S: TaskStore,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            board: self.board.clone(),
            filter: self.filter.clone(),
            capabilities: self.capabilities,
        }
    }
}

impl<S> ReorderEngine<S>
where
    S: TaskStore,
{
    /// Creates an engine writing through `store` and updating `board`.
    #[must_use]
    pub const fn new(
        store: Arc<S>,
        board: Board,
        filter: OwnerFilter,
        capabilities: StoreCapabilities,
    ) -> Self {
        Self {
            store,
            board,
            filter,
            capabilities,
        }
    }

    /// Returns the board this engine updates.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Moves a task inside its group and applies the result locally.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskNotFound`] when the task is not on the
    /// board. The board is left untouched.
    pub fn reorder_within_group(
        &self,
        task_id: TaskId,
        raw_index: usize,
    ) -> Result<DropOutcome, BoardDomainError> {
        let outcome = self.apply_locally(|state| state.reorder_within_group(task_id, raw_index))?;
        debug!(task_id = %task_id, raw_index, ?outcome, "task reorder applied");
        Ok(outcome)
    }

    /// Moves a task into `destination` at `index` and applies the result
    /// locally.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskNotFound`] or
    /// [`BoardDomainError::UnknownGroup`]. The board is left untouched.
    pub fn move_to_group(
        &self,
        task_id: TaskId,
        destination: &GroupLabel,
        index: usize,
    ) -> Result<DropOutcome, BoardDomainError> {
        let outcome =
            self.apply_locally(|state| state.move_to_group(task_id, destination, index))?;
        debug!(task_id = %task_id, destination = %destination, index, ?outcome, "task move applied");
        Ok(outcome)
    }

    fn apply_locally(
        &self,
        command: impl FnOnce(&BoardState) -> Result<Option<TaskReorder>, BoardDomainError>,
    ) -> Result<DropOutcome, BoardDomainError> {
        let applied = self.board.apply(|state| {
            Ok::<_, BoardDomainError>(command(state)?.map(|reorder| {
                let plan = self.plan_for(&reorder);
                (reorder.state, plan)
            }))
        })?;
        Ok(match applied {
            None => DropOutcome::Unchanged,
            Some(None) => DropOutcome::Applied,
            Some(Some(plan)) => DropOutcome::Pending(plan),
        })
    }

    fn plan_for(&self, reorder: &TaskReorder) -> Option<PersistPlan> {
        let track_positions = self.capabilities.position_column;
        if !reorder.is_cross_group() {
            if !track_positions || reorder.destination_changes.is_empty() {
                return None;
            }
            return Some(PersistPlan {
                operation: DropOperation::Reorder,
                task_id: reorder.task_id,
                lead: None,
                followers: position_updates(&reorder.destination_changes).collect(),
            });
        }

        let mut lead = TaskChanges::new().with_label(reorder.to.clone());
        let mut followers = Vec::new();
        if track_positions {
            lead = lead.with_position(reorder.moved_position);
            followers.extend(position_updates(&reorder.destination_changes));
            followers.extend(position_updates(&reorder.source_changes));
        }
        Some(PersistPlan {
            operation: DropOperation::Move,
            task_id: reorder.task_id,
            lead: Some((reorder.task_id, lead)),
            followers,
        })
    }

    /// Writes `plan` to the row-store.
    ///
    /// The moved task's own update is awaited first; the remaining position
    /// updates are issued concurrently. When any write fails the board is
    /// reloaded from the row-store, discarding every optimistic change, and
    /// the generic failure message is stored in the error slot.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::DropFailed`] when a write fails.
    pub async fn persist(&self, plan: PersistPlan) -> BoardServiceResult<()> {
        let operation = plan.operation;
        let task_id = plan.task_id;
        let updates = plan.update_count();
        match self.write(plan).await {
            Ok(()) => {
                info!(task_id = %task_id, updates, %operation, "drop persisted");
                self.board.clear_error();
                Ok(())
            }
            Err(source) => {
                warn!(task_id = %task_id, error = %source, %operation, "drop failed; reloading board");
                if let Err(reload_error) = self.reload().await {
                    warn!(error = %reload_error, "board reload after failed drop failed");
                }
                self.board.set_error(operation.failure_message());
                Err(BoardServiceError::DropFailed { operation, source })
            }
        }
    }

    async fn write(&self, plan: PersistPlan) -> TaskStoreResult<()> {
        if let Some((id, changes)) = plan.lead {
            self.store.update(id, changes).await?;
        }
        try_join_all(
            plan.followers
                .into_iter()
                .map(|(id, changes)| self.store.update(id, changes)),
        )
        .await?;
        Ok(())
    }

    /// Replaces the board's tasks with the row-store contents, keeping the
    /// group order.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Store`] when the read fails.
    pub async fn reload(&self) -> BoardServiceResult<()> {
        let tasks = self.store.select_all(self.filter.clone()).await?;
        self.board.update(|state| state.with_tasks(tasks));
        Ok(())
    }
}

impl<S> ReorderEngine<S>
where
    S: TaskStore + 'static,
{
    /// Persists `plan` on a background task.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn_persist(&self, plan: PersistPlan) -> tokio::task::JoinHandle<BoardServiceResult<()>> {
        let engine = self.clone();
        tokio::spawn(async move { engine.persist(plan).await })
    }
}
