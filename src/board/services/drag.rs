//! Pointer-driven drag controller tying the drag state machine to the
//! reorder engine and group order controller.

use super::container::Board;
use super::error::BoardServiceResult;
use super::group_order::GroupOrderController;
use super::reorder::{DropOutcome, ReorderEngine};
use crate::board::domain::{
    BoardDomainError, DragState, DropCommand, DropPreview, GroupLabel, Point, TaskId,
};
use crate::board::ports::{LayoutSource, TaskStore};
use crate::local_store::ports::KeyValueStore;
use tracing::debug;

/// Owns the drag state for one board view.
///
/// Pointer-up returns as soon as the local board is updated. A
/// [`DropOutcome::Pending`] plan is handed back for the caller to persist,
/// typically through [`ReorderEngine::spawn_persist`], so a new drag can
/// start while the previous drop is still being written.
#[derive(Debug)]
pub struct DragController<S, K>
where
    S: TaskStore,
    K: KeyValueStore,
{
    state: DragState,
    board: Board,
    engine: ReorderEngine<S>,
    groups: GroupOrderController<K>,
}

impl<S, K> DragController<S, K>
where
    S: TaskStore,
    K: KeyValueStore,
{
    /// Creates an idle controller over the engine's board.
    #[must_use]
    pub fn new(engine: ReorderEngine<S>, groups: GroupOrderController<K>) -> Self {
        Self {
            state: DragState::Idle,
            board: engine.board().clone(),
            engine,
            groups,
        }
    }

    /// Returns the current drag state.
    #[must_use]
    pub const fn state(&self) -> &DragState {
        &self.state
    }

    /// Returns the live task drop preview.
    #[must_use]
    pub const fn preview(&self) -> Option<&DropPreview> {
        self.state.preview()
    }

    /// Returns where the drag ghost should be drawn.
    #[must_use]
    pub fn ghost_origin(&self) -> Option<Point> {
        self.state.ghost_origin()
    }

    /// Returns the engine used to persist pending drops.
    #[must_use]
    pub const fn engine(&self) -> &ReorderEngine<S> {
        &self.engine
    }

    /// Starts dragging a task card whose top-left corner is `card_origin`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskNotFound`] for a task missing from the
    /// board, or [`BoardDomainError::DragInProgress`] while another drag is
    /// active.
    pub fn pointer_down_on_task(
        &mut self,
        task_id: TaskId,
        pointer: Point,
        card_origin: Point,
    ) -> Result<(), BoardDomainError> {
        let (source_group, _) = self
            .board
            .snapshot()
            .locate(task_id)
            .ok_or(BoardDomainError::TaskNotFound(task_id))?;
        self.state
            .begin_task(task_id, source_group, pointer, card_origin)?;
        debug!(task_id = %task_id, "task drag started");
        Ok(())
    }

    /// Starts dragging a group column whose top-left corner is
    /// `column_origin`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::UnknownGroup`] for a label missing from
    /// the board, or [`BoardDomainError::DragInProgress`] while another drag
    /// is active.
    pub fn pointer_down_on_group(
        &mut self,
        label: &GroupLabel,
        pointer: Point,
        column_origin: Point,
    ) -> Result<(), BoardDomainError> {
        if !self.board.snapshot().has_group(label) {
            return Err(BoardDomainError::UnknownGroup(label.clone()));
        }
        self.state
            .begin_group(label.clone(), pointer, column_origin)?;
        debug!(label = %label, "group drag started");
        Ok(())
    }

    /// Tracks the pointer and refreshes the preview. Layout is only measured
    /// while a drag is active.
    pub fn pointer_move(&mut self, pointer: Point, layout: &impl LayoutSource) {
        if self.state.is_idle() {
            return;
        }
        self.state.pointer_moved(&layout.board_layout(), pointer);
    }

    /// Ends the drag and applies the drop to the board.
    ///
    /// The drag state is idle afterwards whatever the result.
    ///
    /// # Errors
    ///
    /// Returns a domain error when the dragged item vanished from the board,
    /// or [`super::BoardServiceError::GroupOrderFailed`] when a new group
    /// order cannot be stored.
    pub fn pointer_up(
        &mut self,
        pointer: Point,
        layout: &impl LayoutSource,
    ) -> BoardServiceResult<DropOutcome> {
        if self.state.is_idle() {
            return Ok(DropOutcome::Ignored);
        }
        let Some(command) = self.state.release(&layout.board_layout(), pointer) else {
            debug!("drag released outside every column");
            return Ok(DropOutcome::Ignored);
        };
        match command {
            DropCommand::ReorderTask { task_id, raw_index } => {
                Ok(self.engine.reorder_within_group(task_id, raw_index)?)
            }
            DropCommand::MoveTask {
                task_id,
                destination,
                index,
            } => Ok(self.engine.move_to_group(task_id, &destination, index)?),
            DropCommand::ReorderGroup { label, raw_index } => {
                self.groups.reorder(&label, raw_index)
            }
        }
    }
}
