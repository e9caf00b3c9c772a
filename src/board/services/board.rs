//! Board orchestration service: loading, task forms, and group management.

use super::container::Board;
use super::drag::DragController;
use super::error::{BoardServiceError, BoardServiceResult};
use super::group_order::GroupOrderController;
use super::group_order_storage::GroupOrderStorage;
use super::reorder::ReorderEngine;
use crate::board::domain::{
    BoardDomainError, BoardState, FieldErrors, GroupLabel, NewTask, OwnerId, Period,
    StoreCapabilities, TaskChanges, TaskGroup, TaskId, TaskTitle,
};
use crate::board::ports::{OwnerFilter, TaskStore, TaskStoreError};
use crate::config::BoardConfig;
use crate::local_store::ports::KeyValueStore;
use chrono::Duration;
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Form submission creating one or more tasks in a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTasksRequest {
    label: String,
    titles: Vec<String>,
    period: Period,
}

impl CreateTasksRequest {
    /// Creates a request targeting `label` with no titles yet.
    #[must_use]
    pub fn new(label: impl Into<String>, period: Period) -> Self {
        Self {
            label: label.into(),
            titles: Vec::new(),
            period,
        }
    }

    /// Adds one title row.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.titles.push(title.into());
        self
    }

    /// Adds several title rows.
    #[must_use]
    pub fn with_titles(mut self, titles: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.titles.extend(titles.into_iter().map(Into::into));
        self
    }

    /// Validates every field, keying failures as `label` and `title_<n>`
    /// (1-based).
    fn validate(&self) -> Result<(GroupLabel, Vec<TaskTitle>), FieldErrors> {
        let mut errors = FieldErrors::new();
        let label = GroupLabel::new(&self.label)
            .map_err(|err| errors.push("label", err))
            .ok();
        if self.titles.is_empty() {
            errors.push("titles", BoardDomainError::EmptyBatch);
        }
        let mut titles = Vec::with_capacity(self.titles.len());
        for (row, raw) in (1_usize..).zip(&self.titles) {
            match TaskTitle::new(raw) {
                Ok(title) => titles.push(title),
                Err(err) => errors.push(format!("title_{row}"), err),
            }
        }
        errors.into_result()?;
        label.map(|valid| (valid, titles)).ok_or_else(FieldErrors::new)
    }
}

/// Form submission editing one task. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    label: Option<String>,
    period: Option<Period>,
}

impl UpdateTaskRequest {
    /// Creates an empty edit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the new group label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the new period.
    #[must_use]
    pub const fn with_period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    fn validate(&self) -> Result<TaskChanges, FieldErrors> {
        let mut errors = FieldErrors::new();
        let mut changes = TaskChanges::new();
        if let Some(raw) = &self.title {
            match TaskTitle::new(raw) {
                Ok(title) => changes = changes.with_title(title),
                Err(err) => errors.push("title", err),
            }
        }
        if let Some(raw) = &self.label {
            match GroupLabel::new(raw) {
                Ok(label) => changes = changes.with_label(label),
                Err(err) => errors.push("label", err),
            }
        }
        if let Some(period) = self.period {
            changes = changes.with_period(period);
        }
        errors.into_result()?;
        Ok(changes)
    }
}

/// Board service for one signed-in identity.
///
/// Every operation that touches the row-store records its outcome in the
/// board's error slot: a failure stores its message, a success clears it.
/// Form validation failures are returned as
/// [`BoardServiceError::Validation`] and never reach the slot.
#[derive(Debug)]
pub struct BoardService<S, K, C>
where
    S: TaskStore,
    K: KeyValueStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    storage: GroupOrderStorage<K>,
    clock: Arc<C>,
    board: Board,
    owner: OwnerId,
    capabilities: StoreCapabilities,
}

impl<S, K, C> BoardService<S, K, C>
where
    S: TaskStore,
    K: KeyValueStore,
    C: Clock + Send + Sync,
{
    /// Creates a service with an empty board for `owner`.
    #[must_use]
    pub fn new(
        store: Arc<S>,
        local_store: Arc<K>,
        clock: Arc<C>,
        owner: OwnerId,
        config: &BoardConfig,
    ) -> Self {
        Self {
            store,
            storage: GroupOrderStorage::new(local_store, config.storage.group_order_prefix.clone()),
            clock,
            board: Board::new(),
            owner,
            capabilities: config.store,
        }
    }

    /// Returns the shared board handle.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the signed-in identity.
    #[must_use]
    pub const fn owner(&self) -> &OwnerId {
        &self.owner
    }

    /// Returns the current user-visible error.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.board.error()
    }

    /// Returns every group with its tasks in display order.
    #[must_use]
    pub fn groups(&self) -> Vec<TaskGroup> {
        self.board.groups()
    }

    fn filter(&self) -> OwnerFilter {
        if self.capabilities.owner_column {
            OwnerFilter::Owner(self.owner.clone())
        } else {
            OwnerFilter::Any
        }
    }

    /// Returns a reorder engine sharing this service's board.
    #[must_use]
    pub fn reorder_engine(&self) -> ReorderEngine<S> {
        ReorderEngine::new(
            Arc::clone(&self.store),
            self.board.clone(),
            self.filter(),
            self.capabilities,
        )
    }

    /// Returns a group order controller sharing this service's board.
    #[must_use]
    pub fn group_order_controller(&self) -> GroupOrderController<K> {
        GroupOrderController::new(self.board.clone(), self.storage.clone(), self.owner.clone())
    }

    /// Returns an idle drag controller sharing this service's board.
    #[must_use]
    pub fn drag_controller(&self) -> DragController<S, K> {
        DragController::new(self.reorder_engine(), self.group_order_controller())
    }

    fn record<T>(&self, result: BoardServiceResult<T>) -> BoardServiceResult<T> {
        match &result {
            Ok(_) => self.board.clear_error(),
            Err(BoardServiceError::Validation(_)) => {}
            Err(err) => {
                warn!(owner = %self.owner, error = %err, "board operation failed");
                self.board.set_error(err.to_string());
            }
        }
        result
    }

    /// Loads the identity's tasks and stored group order into the board.
    ///
    /// An unreadable stored order is logged and replaced by the order
    /// already on the board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Store`] when the tasks cannot be read.
    pub async fn fetch_tasks(&self) -> BoardServiceResult<()> {
        let result = self.load().await;
        self.record(result)
    }

    async fn load(&self) -> BoardServiceResult<()> {
        let stored = match self.storage.load(&self.owner) {
            Ok(order) => order,
            Err(err) => {
                warn!(owner = %self.owner, error = %err, "stored group order unreadable");
                None
            }
        };
        let tasks = self.store.select_all(self.filter()).await?;
        let count = tasks.len();
        self.board.update(|current| {
            let order = stored.unwrap_or_else(|| current.group_order().to_vec());
            BoardState::new(tasks, order)
        });
        debug!(owner = %self.owner, tasks = count, "board loaded");
        Ok(())
    }

    async fn reload_after_failure(&self) {
        if let Err(err) = self.load().await {
            warn!(owner = %self.owner, error = %err, "board reload failed");
        }
    }

    /// Creates one task per title in the request's group.
    ///
    /// Tasks are appended to the group in title order. Nothing is written
    /// when any field fails validation.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Validation`] for invalid input or
    /// [`BoardServiceError::Store`] when the insert or reload fails.
    pub async fn create_tasks(
        &self,
        request: CreateTasksRequest,
    ) -> BoardServiceResult<Vec<TaskId>> {
        let (label, titles) = request.validate().map_err(BoardServiceError::Validation)?;
        let result = self.insert_tasks(label, titles, request.period).await;
        self.record(result)
    }

    async fn insert_tasks(
        &self,
        label: GroupLabel,
        titles: Vec<TaskTitle>,
        period: Period,
    ) -> BoardServiceResult<Vec<TaskId>> {
        let now = self.clock.utc();
        let mut position = self.board.snapshot().next_position(&label);
        let owner = self.capabilities.owner_column.then(|| self.owner.clone());
        let mut rows = Vec::with_capacity(titles.len());
        for (offset, title) in (0_i64..).zip(titles) {
            rows.push(NewTask {
                id: TaskId::new(),
                title,
                label: label.clone(),
                period,
                position: self.capabilities.position_column.then_some(position),
                owner: owner.clone(),
                // Strictly increasing timestamps keep creation order stable.
                created_at: now + Duration::microseconds(offset),
            });
            position = position.next();
        }
        let ids: Vec<TaskId> = rows.iter().map(|row| row.id).collect();
        self.store.insert_batch(rows).await?;
        info!(label = %label, count = ids.len(), "tasks created");
        self.load().await?;
        Ok(ids)
    }

    /// Edits one task. Moving it to another group appends it there.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Validation`] for invalid input, or a
    /// domain or store error when the task is missing or the write fails.
    pub async fn update_task(
        &self,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> BoardServiceResult<()> {
        let changes = request.validate().map_err(BoardServiceError::Validation)?;
        let result = self.write_task_changes(id, changes).await;
        self.record(result)
    }

    async fn write_task_changes(
        &self,
        id: TaskId,
        requested: TaskChanges,
    ) -> BoardServiceResult<()> {
        let snapshot = self.board.snapshot();
        let task = snapshot
            .task(id)
            .ok_or(BoardDomainError::TaskNotFound(id))?;
        let mut changes = requested;
        if let Some(label) = changes.label.clone() {
            if &label == task.label() {
                changes.label = None;
            } else if self.capabilities.position_column {
                changes = changes.with_position(snapshot.next_position(&label));
            }
        }
        if changes.is_empty() {
            debug!(task_id = %id, "task edit changes nothing");
            return Ok(());
        }
        self.store.update(id, changes).await?;
        info!(task_id = %id, "task updated");
        self.load().await
    }

    /// Deletes one task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Store`] when the delete or reload fails.
    pub async fn delete_task(&self, id: TaskId) -> BoardServiceResult<()> {
        let result = self.remove_task(id).await;
        self.record(result)
    }

    async fn remove_task(&self, id: TaskId) -> BoardServiceResult<()> {
        self.store.delete(id).await?;
        self.board.update(|state| state.without_task(id));
        info!(task_id = %id, "task deleted");
        self.load().await
    }

    /// Adds an empty group at the end of the board and stores the order.
    /// Adding an existing label changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Validation`] for an invalid label or
    /// [`BoardServiceError::GroupOrderFailed`] when the order cannot be
    /// stored.
    pub fn create_empty_group(&self, raw_label: &str) -> BoardServiceResult<GroupLabel> {
        let label = GroupLabel::new(raw_label).map_err(|err| {
            let mut errors = FieldErrors::new();
            errors.push("label", err);
            BoardServiceError::Validation(errors)
        })?;
        self.add_group(label)
    }

    /// Adds an empty group under a generated placeholder label.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::GroupOrderFailed`] when the order cannot
    /// be stored.
    pub fn create_placeholder_group(&self) -> BoardServiceResult<GroupLabel> {
        let label = self.board.snapshot().placeholder_label();
        self.add_group(label)
    }

    fn add_group(&self, label: GroupLabel) -> BoardServiceResult<GroupLabel> {
        let added = self.board.apply(|state| {
            Ok::<_, BoardServiceError>(state.with_empty_group(label.clone()).map(|next| (next, ())))
        })?;
        if added.is_none() {
            debug!(label = %label, "group already exists");
            return Ok(label);
        }
        self.group_order_controller().sync()?;
        info!(label = %label, "group created");
        Ok(label)
    }

    /// Replaces the whole group order.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::GroupOrderFailed`] when the order cannot
    /// be stored.
    pub fn reorder_groups(&self, order: Vec<GroupLabel>) -> BoardServiceResult<()> {
        self.group_order_controller().set_order(order)
    }

    /// Renames a group, relabelling every member.
    ///
    /// Collisions are detected on the local board before any write. A failed
    /// row write reloads the board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Validation`] for an invalid label,
    /// [`BoardServiceError::Domain`] for a collision or unknown group, or a
    /// store error when a write fails.
    pub async fn rename_group(
        &self,
        old_label: &GroupLabel,
        raw_label: &str,
    ) -> BoardServiceResult<()> {
        let new_label = GroupLabel::new(raw_label).map_err(|err| {
            let mut errors = FieldErrors::new();
            errors.push("label", err);
            BoardServiceError::Validation(errors)
        })?;
        let result = self.relabel_group(old_label, new_label).await;
        self.record(result)
    }

    async fn relabel_group(
        &self,
        old_label: &GroupLabel,
        new_label: GroupLabel,
    ) -> BoardServiceResult<()> {
        let snapshot = self.board.snapshot();
        snapshot.with_group_renamed(old_label, &new_label)?;
        if old_label == &new_label {
            return Ok(());
        }
        let members: Vec<TaskId> = snapshot
            .group_tasks(old_label)
            .iter()
            .map(|task| task.id())
            .collect();
        for id in &members {
            let changes = TaskChanges::new().with_label(new_label.clone());
            if let Err(err) = self.store.update(*id, changes).await {
                self.reload_after_failure().await;
                return Err(err.into());
            }
        }
        self.board.apply(|state| {
            state
                .with_group_renamed(old_label, &new_label)
                .map(|next| Some((next, ())))
        })?;
        self.group_order_controller().sync()?;
        info!(from = %old_label, to = %new_label, tasks = members.len(), "group renamed");
        self.load().await
    }

    /// Deletes a group and every task in it. Deleting an unknown group
    /// succeeds without effect.
    ///
    /// # Errors
    ///
    /// Returns a store error when a delete fails, or
    /// [`BoardServiceError::GroupOrderFailed`] when the order cannot be
    /// stored.
    pub async fn delete_group(&self, label: &GroupLabel) -> BoardServiceResult<()> {
        let result = self.remove_group(label).await;
        self.record(result)
    }

    async fn remove_group(&self, label: &GroupLabel) -> BoardServiceResult<()> {
        let members: Vec<TaskId> = self
            .board
            .snapshot()
            .group_tasks(label)
            .iter()
            .map(|task| task.id())
            .collect();
        for id in &members {
            match self.store.delete(*id).await {
                Ok(()) | Err(TaskStoreError::NotFound(_)) => {}
                Err(err) => {
                    self.reload_after_failure().await;
                    return Err(err.into());
                }
            }
        }
        self.board.update(|state| state.without_group(label));
        self.group_order_controller().sync()?;
        info!(label = %label, tasks = members.len(), "group deleted");
        if members.is_empty() {
            return Ok(());
        }
        self.load().await
    }
}

