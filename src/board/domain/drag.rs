//! Drag lifecycle state machine.
//!
//! `Idle -> Dragging -> Idle` for task cards and
//! `Idle -> DraggingGroup -> Idle` for group columns. The two drags are
//! mutually exclusive. Releasing the pointer always returns to `Idle`; the
//! drop itself is handed back as a [`DropCommand`] for the caller to apply.

use super::{
    BoardDomainError, BoardLayout, DropPreview, GroupLabel, Point, TaskId,
    group_insertion_index, task_drop_preview,
};

/// In-flight drag of a task card.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDrag {
    /// Dragged task.
    pub task_id: TaskId,
    /// Group the task belonged to when the drag started.
    pub source_group: GroupLabel,
    /// Pointer position relative to the card's top-left corner.
    pub origin_offset: Point,
    /// Pointer position at drag start.
    pub start: Point,
    /// Latest pointer position.
    pub pointer: Point,
    /// Latest drop preview, `None` while over no column.
    pub preview: Option<DropPreview>,
}

/// In-flight drag of a group column.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupDrag {
    /// Dragged group.
    pub label: GroupLabel,
    /// Pointer position relative to the column's top-left corner.
    pub origin_offset: Point,
    /// Pointer position at drag start.
    pub start: Point,
    /// Latest pointer position.
    pub pointer: Point,
    /// Latest insertion index among the other columns.
    pub insertion_index: Option<usize>,
}

/// Drag lifecycle state.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// A task card is being dragged.
    Dragging(TaskDrag),
    /// A group column is being dragged.
    DraggingGroup(GroupDrag),
}

/// Resolved drop, ready to be applied to the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropCommand {
    /// Move a task inside its own group.
    ReorderTask {
        /// Dragged task.
        task_id: TaskId,
        /// Insertion index computed with the task excluded.
        raw_index: usize,
    },
    /// Move a task into another group.
    MoveTask {
        /// Dragged task.
        task_id: TaskId,
        /// Destination group.
        destination: GroupLabel,
        /// Insertion index in the destination's list.
        index: usize,
    },
    /// Move a group column.
    ReorderGroup {
        /// Dragged group.
        label: GroupLabel,
        /// Insertion index computed with the group excluded.
        raw_index: usize,
    },
}

impl DragState {
    /// Returns `true` when no drag is in progress.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Starts dragging a task card.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::DragInProgress`] when another drag is
    /// active.
    pub fn begin_task(
        &mut self,
        task_id: TaskId,
        source_group: GroupLabel,
        pointer: Point,
        element_origin: Point,
    ) -> Result<(), BoardDomainError> {
        self.ensure_idle()?;
        *self = Self::Dragging(TaskDrag {
            task_id,
            source_group,
            origin_offset: pointer.offset_from(element_origin),
            start: pointer,
            pointer,
            preview: None,
        });
        Ok(())
    }

    /// Starts dragging a group column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::DragInProgress`] when another drag is
    /// active.
    pub fn begin_group(
        &mut self,
        label: GroupLabel,
        pointer: Point,
        element_origin: Point,
    ) -> Result<(), BoardDomainError> {
        self.ensure_idle()?;
        *self = Self::DraggingGroup(GroupDrag {
            label,
            origin_offset: pointer.offset_from(element_origin),
            start: pointer,
            pointer,
            insertion_index: None,
        });
        Ok(())
    }

    /// Records a pointer move and recomputes the preview. Ignored while idle.
    pub fn pointer_moved(&mut self, layout: &BoardLayout, pointer: Point) {
        match self {
            Self::Idle => {}
            Self::Dragging(drag) => {
                drag.pointer = pointer;
                drag.preview = task_drop_preview(layout, pointer, drag.task_id);
            }
            Self::DraggingGroup(drag) => {
                drag.pointer = pointer;
                drag.insertion_index = Some(group_insertion_index(layout, pointer, &drag.label));
            }
        }
    }

    /// Ends the drag and resolves the drop.
    ///
    /// The state is `Idle` afterwards whatever the outcome. Returns `None`
    /// when no drag was active or a task was released over no column.
    pub fn release(&mut self, layout: &BoardLayout, pointer: Point) -> Option<DropCommand> {
        match std::mem::take(self) {
            Self::Idle => None,
            Self::Dragging(drag) => {
                let preview = task_drop_preview(layout, pointer, drag.task_id)?;
                if preview.target_group == drag.source_group {
                    Some(DropCommand::ReorderTask {
                        task_id: drag.task_id,
                        raw_index: preview.insertion_index,
                    })
                } else {
                    Some(DropCommand::MoveTask {
                        task_id: drag.task_id,
                        destination: preview.target_group,
                        index: preview.insertion_index,
                    })
                }
            }
            Self::DraggingGroup(drag) => Some(DropCommand::ReorderGroup {
                raw_index: group_insertion_index(layout, pointer, &drag.label),
                label: drag.label,
            }),
        }
    }

    /// Returns the live task drop preview, if any.
    #[must_use]
    pub const fn preview(&self) -> Option<&DropPreview> {
        match self {
            Self::Dragging(drag) => drag.preview.as_ref(),
            Self::Idle | Self::DraggingGroup(_) => None,
        }
    }

    /// Returns where the drag ghost's top-left corner should be drawn.
    #[must_use]
    pub fn ghost_origin(&self) -> Option<Point> {
        match self {
            Self::Idle => None,
            Self::Dragging(drag) => Some(drag.pointer.minus(drag.origin_offset)),
            Self::DraggingGroup(drag) => Some(drag.pointer.minus(drag.origin_offset)),
        }
    }

    fn ensure_idle(&self) -> Result<(), BoardDomainError> {
        if self.is_idle() {
            Ok(())
        } else {
            Err(BoardDomainError::DragInProgress)
        }
    }
}
