//! Application services for the task board.

mod board;
mod container;
mod drag;
mod error;
mod group_order;
mod group_order_storage;
mod reorder;

pub use board::{BoardService, CreateTasksRequest, UpdateTaskRequest};
pub use container::Board;
pub use drag::DragController;
pub use error::{BoardServiceError, BoardServiceResult, DropOperation};
pub use group_order::GroupOrderController;
pub use group_order_storage::{DEFAULT_GROUP_ORDER_PREFIX, GroupOrderStorage};
pub use reorder::{DropOutcome, PersistPlan, ReorderEngine};
