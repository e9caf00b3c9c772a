//! Drop targeting: pointer position plus measured zones to insertion points.
//!
//! Everything here is a pure function of its inputs. The rendering layer
//! measures its elements into a [`BoardLayout`] and hands it over on every
//! pointer event; no live geometry is read from this module.

use super::{Axis, GroupLabel, Point, Rect, TaskId};

/// Bounding box of one rendered task card.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemZone {
    /// Task rendered in the card.
    pub task_id: TaskId,
    /// Card bounds.
    pub bounds: Rect,
}

/// Bounding box of one rendered group column and its visible cards.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupZone {
    /// Group rendered in the column.
    pub label: GroupLabel,
    /// Column bounds.
    pub bounds: Rect,
    /// Visible cards in display order.
    pub items: Vec<ItemZone>,
}

impl GroupZone {
    /// Creates a zone with no cards.
    #[must_use]
    pub const fn new(label: GroupLabel, bounds: Rect) -> Self {
        Self {
            label,
            bounds,
            items: Vec::new(),
        }
    }

    /// Adds a card below the existing ones.
    #[must_use]
    pub fn with_item(mut self, task_id: TaskId, bounds: Rect) -> Self {
        self.items.push(ItemZone { task_id, bounds });
        self
    }
}

/// Measured layout of the whole board, columns in display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardLayout {
    /// Rendered group columns.
    pub groups: Vec<GroupZone>,
}

impl BoardLayout {
    /// Creates a layout from measured columns.
    #[must_use]
    pub const fn new(groups: Vec<GroupZone>) -> Self {
        Self { groups }
    }

    /// Returns the column containing `pointer`.
    #[must_use]
    pub fn zone_at(&self, pointer: Point) -> Option<&GroupZone> {
        self.groups.iter().find(|zone| zone.bounds.contains(pointer))
    }
}

/// Live indication of where a dragged task would land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropPreview {
    /// Group under the pointer.
    pub target_group: GroupLabel,
    /// Insertion index among the group's visible cards.
    pub insertion_index: usize,
}

/// Returns the index of the first center lying after `pointer`, or the
/// number of centers when none does.
///
/// Insertion happens before the first item whose center exceeds the pointer,
/// so a pointer exactly on a center inserts after that item.
#[must_use]
pub fn insertion_index<I>(centers: I, pointer: f64) -> usize
where
    I: IntoIterator<Item = f64>,
{
    let mut count = 0;
    for (index, center) in centers.into_iter().enumerate() {
        if pointer < center {
            return index;
        }
        count = index + 1;
    }
    count
}

/// Computes the drop preview for a dragged task.
///
/// Returns `None` when the pointer is over no column. The dragged card is
/// skipped even if the layout still lists it.
#[must_use]
pub fn task_drop_preview(
    layout: &BoardLayout,
    pointer: Point,
    dragged: TaskId,
) -> Option<DropPreview> {
    let zone = layout.zone_at(pointer)?;
    let centers = zone
        .items
        .iter()
        .filter(|item| item.task_id != dragged)
        .map(|item| item.bounds.center(Axis::Vertical));
    Some(DropPreview {
        target_group: zone.label.clone(),
        insertion_index: insertion_index(centers, Axis::Vertical.coordinate(pointer)),
    })
}

/// Computes the insertion index for a dragged group column.
///
/// Columns are scanned left to right by horizontal center, the dragged column
/// excluded. A pointer past every column appends at the end.
#[must_use]
pub fn group_insertion_index(layout: &BoardLayout, pointer: Point, dragged: &GroupLabel) -> usize {
    let centers = layout
        .groups
        .iter()
        .filter(|zone| &zone.label != dragged)
        .map(|zone| zone.bounds.center(Axis::Horizontal));
    insertion_index(centers, Axis::Horizontal.coordinate(pointer))
}
