//! Per-identity group order persisted in client-local storage.

use crate::board::domain::{GroupLabel, OwnerId};
use crate::local_store::ports::{KeyValueError, KeyValueResult, KeyValueStore};
use std::sync::Arc;

/// Default key prefix; the full key is the prefix followed by the identity.
pub const DEFAULT_GROUP_ORDER_PREFIX: &str = "groupOrder_";

/// Reads and writes an identity's group order as one JSON array of labels.
#[derive(Debug)]
pub struct GroupOrderStorage<K>
where
    K: KeyValueStore,
{
    store: Arc<K>,
    prefix: String,
}

impl<K> Clone for GroupOrderStorage<K>
where
    K: KeyValueStore,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            prefix: self.prefix.clone(),
        }
    }
}

impl<K> GroupOrderStorage<K>
where
    K: KeyValueStore,
{
    /// Creates storage writing keys `<prefix><owner>`.
    #[must_use]
    pub fn new(store: Arc<K>, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }

    fn key(&self, owner: &OwnerId) -> String {
        format!("{}{owner}", self.prefix)
    }

    /// Loads the stored order, `None` when nothing was stored.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueError`] when storage cannot be read or the stored
    /// value is not a JSON array of valid labels.
    pub fn load(&self, owner: &OwnerId) -> KeyValueResult<Option<Vec<GroupLabel>>> {
        let Some(raw) = self.store.get(&self.key(owner))? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(KeyValueError::persistence)
    }

    /// Stores `order`, replacing the previous value.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueError`] when the write fails.
    pub fn save(&self, owner: &OwnerId, order: &[GroupLabel]) -> KeyValueResult<()> {
        let encoded = serde_json::to_string(order).map_err(KeyValueError::persistence)?;
        self.store.set(&self.key(owner), &encoded)
    }
}
