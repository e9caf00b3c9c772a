//! Injectable board state container.

use crate::board::domain::{BoardState, TaskGroup};
use parking_lot::RwLock;
use std::sync::Arc;

/// Shared, explicitly passed board state plus the process-wide error slot.
///
/// Cloning yields another handle to the same state. Every mutation swaps a
/// whole [`BoardState`] under one write lock, so readers never observe a
/// half-applied reorder.
#[derive(Debug, Clone, Default)]
pub struct Board {
    inner: Arc<RwLock<BoardSlot>>,
}

#[derive(Debug, Default)]
struct BoardSlot {
    state: BoardState,
    error: Option<String>,
}

impl Board {
    /// Creates an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a board holding `state`.
    #[must_use]
    pub fn with_state(state: BoardState) -> Self {
        Self {
            inner: Arc::new(RwLock::new(BoardSlot { state, error: None })),
        }
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> BoardState {
        self.inner.read().state.clone()
    }

    /// Returns every group with its tasks in display order.
    #[must_use]
    pub fn groups(&self) -> Vec<TaskGroup> {
        self.inner.read().state.groups()
    }

    /// Replaces the whole state.
    pub fn replace(&self, state: BoardState) {
        self.inner.write().state = state;
    }

    /// Replaces the state with `update(current)` under a single write lock.
    pub fn update(&self, update: impl FnOnce(&BoardState) -> BoardState) {
        let mut slot = self.inner.write();
        slot.state = update(&slot.state);
    }

    /// Computes and installs a new state under a single write lock.
    ///
    /// `command` returns `Ok(None)` to leave the state untouched, or the new
    /// state plus a value handed back to the caller.
    ///
    /// # Errors
    ///
    /// Propagates the error returned by `command`; the state is unchanged.
    pub fn apply<T, E>(
        &self,
        command: impl FnOnce(&BoardState) -> Result<Option<(BoardState, T)>, E>,
    ) -> Result<Option<T>, E> {
        let mut slot = self.inner.write();
        let Some((next, output)) = command(&slot.state)? else {
            return Ok(None);
        };
        slot.state = next;
        Ok(Some(output))
    }

    /// Returns the current user-visible error message.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.inner.read().error.clone()
    }

    /// Stores a user-visible error message.
    pub fn set_error(&self, message: impl Into<String>) {
        self.inner.write().error = Some(message.into());
    }

    /// Clears the error message after a successful operation.
    pub fn clear_error(&self) {
        self.inner.write().error = None;
    }
}
