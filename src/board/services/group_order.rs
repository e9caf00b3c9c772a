//! Group drag handling: reorders labels and stores the order per identity.

use super::container::Board;
use super::error::{BoardServiceError, BoardServiceResult};
use super::group_order_storage::GroupOrderStorage;
use super::reorder::DropOutcome;
use crate::board::domain::{BoardDomainError, GroupLabel, OwnerId};
use crate::local_store::ports::KeyValueStore;
use tracing::{debug, info, warn};

/// Reorders groups on the board and persists the full order as one unit.
#[derive(Debug)]
pub struct GroupOrderController<K>
where
    K: KeyValueStore,
{
    board: Board,
    storage: GroupOrderStorage<K>,
    owner: OwnerId,
}

impl<K> Clone for GroupOrderController<K>
where
    K: KeyValueStore,
{
    fn clone(&self) -> Self {
        Self {
            board: self.board.clone(),
            storage: self.storage.clone(),
            owner: self.owner.clone(),
        }
    }
}

impl<K> GroupOrderController<K>
where
    K: KeyValueStore,
{
    /// Creates a controller storing `owner`'s order through `storage`.
    #[must_use]
    pub const fn new(board: Board, storage: GroupOrderStorage<K>, owner: OwnerId) -> Self {
        Self {
            board,
            storage,
            owner,
        }
    }

    /// Moves `label` to the rank given by `raw_index`, computed with the
    /// dragged group excluded.
    ///
    /// The new order is applied before it is stored. A storage failure keeps
    /// the local order and sets the error slot.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Domain`] for an unknown label, or
    /// [`BoardServiceError::GroupOrderFailed`] when storing fails.
    pub fn reorder(&self, label: &GroupLabel, raw_index: usize) -> BoardServiceResult<DropOutcome> {
        let applied = self.board.apply(|state| {
            Ok::<_, BoardDomainError>(state.reorder_groups(label, raw_index)?.map(|next| {
                let order = next.group_order().to_vec();
                (next, order)
            }))
        })?;
        let Some(order) = applied else {
            debug!(label = %label, raw_index, "group dropped onto its own slot");
            return Ok(DropOutcome::Unchanged);
        };
        self.store(&order)?;
        info!(label = %label, groups = order.len(), "group order changed");
        Ok(DropOutcome::Applied)
    }

    /// Replaces the whole group order and stores it.
    ///
    /// Labels absent from `order` but still carrying tasks are appended.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::GroupOrderFailed`] when storing fails.
    pub fn set_order(&self, order: Vec<GroupLabel>) -> BoardServiceResult<()> {
        let mut stored = Vec::new();
        self.board.update(|state| {
            let next = state.with_group_order(order);
            stored = next.group_order().to_vec();
            next
        });
        self.store(&stored)
    }

    /// Stores the board's current order.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::GroupOrderFailed`] when storing fails.
    pub fn sync(&self) -> BoardServiceResult<()> {
        let order = self.board.snapshot().group_order().to_vec();
        self.store(&order)
    }

    fn store(&self, order: &[GroupLabel]) -> BoardServiceResult<()> {
        match self.storage.save(&self.owner, order) {
            Ok(()) => {
                self.board.clear_error();
                Ok(())
            }
            Err(err) => {
                warn!(owner = %self.owner, error = %err, "storing group order failed");
                self.board.set_error("group reorder failed");
                Err(BoardServiceError::GroupOrderFailed(err))
            }
        }
    }
}
