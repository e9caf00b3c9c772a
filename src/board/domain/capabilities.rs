//! Statically declared row-store capabilities.

use serde::Deserialize;

/// Optional columns the row-store is known to provide.
///
/// Declared once at startup instead of probed at runtime. A missing column
/// degrades the dependent feature rather than failing the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreCapabilities {
    /// The store keeps an integer `position` per task. Without it tasks are
    /// shown in creation order and reorders are not persisted.
    pub position_column: bool,
    /// The store keeps an owner identity per task. Without it reads are
    /// unfiltered and inserts carry no owner.
    pub owner_column: bool,
}

impl StoreCapabilities {
    /// Capabilities of a store with every optional column.
    pub const FULL: Self = Self {
        position_column: true,
        owner_column: true,
    };
}

impl Default for StoreCapabilities {
    fn default() -> Self {
        Self::FULL
    }
}
