//! Service-level errors for board operations.

use crate::board::domain::{BoardDomainError, FieldErrors};
use crate::board::ports::TaskStoreError;
use crate::local_store::ports::KeyValueError;
use std::fmt;
use thiserror::Error;

/// Kind of optimistic drop whose persistence failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOperation {
    /// Task moved inside its group.
    Reorder,
    /// Task moved to another group.
    Move,
}

impl DropOperation {
    /// Returns the generic user-facing message for a failed persist.
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::Reorder => "reorder failed",
            Self::Move => "move failed",
        }
    }
}

impl fmt::Display for DropOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.failure_message())
    }
}

/// Service-level errors for board operations.
#[derive(Debug, Error)]
pub enum BoardServiceError {
    /// Domain validation or command failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),

    /// Form input failed validation; nothing was written.
    #[error("invalid input: {0}")]
    Validation(FieldErrors),

    /// Row-store operation failed.
    #[error(transparent)]
    Store(#[from] TaskStoreError),

    /// Persisting an optimistic drop failed; the board was reloaded.
    #[error("{operation}: {source}")]
    DropFailed {
        /// Kind of drop that failed.
        operation: DropOperation,
        /// Underlying store failure.
        source: TaskStoreError,
    },

    /// Persisting a new group order failed; the local order was kept.
    #[error("group reorder failed: {0}")]
    GroupOrderFailed(#[source] KeyValueError),
}

/// Result type for board service operations.
pub type BoardServiceResult<T> = Result<T, BoardServiceError>;
