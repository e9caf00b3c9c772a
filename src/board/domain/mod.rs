//! Domain model for the task board.
//!
//! Tasks, groups, positions, pointer targeting, and the drag lifecycle. All
//! types here are pure values; persistence and shared state live in the
//! service layer.

mod capabilities;
mod drag;
mod error;
mod geometry;
mod ids;
mod period;
mod state;
mod targeting;
mod task;

pub use capabilities::StoreCapabilities;
pub use drag::{DragState, DropCommand, GroupDrag, TaskDrag};
pub use error::{BoardDomainError, FieldError, FieldErrors};
pub use geometry::{Axis, Point, Rect};
pub use ids::{GroupLabel, OwnerId, Position, TaskId, TaskTitle};
pub use period::Period;
pub use state::{BoardState, PositionChange, TaskReorder, resolve_insertion};
pub use targeting::{
    BoardLayout, DropPreview, GroupZone, ItemZone, group_insertion_index, insertion_index,
    task_drop_preview,
};
pub use task::{NewTask, PersistedTaskData, Task, TaskChanges, TaskGroup};
