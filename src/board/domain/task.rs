//! Task records, pending inserts, and partial task changes.

use super::{GroupLabel, OwnerId, Period, Position, TaskId, TaskTitle};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A task row as displayed on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    label: GroupLabel,
    period: Period,
    position: Option<Position>,
    owner: Option<OwnerId>,
    created_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a task read from the row-store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted group label.
    pub label: GroupLabel,
    /// Persisted display period.
    pub period: Period,
    /// Persisted position, absent when the store has no position column.
    pub position: Option<Position>,
    /// Persisted owner, absent when the store has no owner column.
    pub owner: Option<OwnerId>,
    /// Persisted creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            label: data.label,
            period: data.period,
            position: data.position,
            owner: data.owner,
            created_at: data.created_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the label of the group holding the task.
    #[must_use]
    pub const fn label(&self) -> &GroupLabel {
        &self.label
    }

    /// Returns the display period.
    #[must_use]
    pub const fn period(&self) -> Period {
        self.period
    }

    /// Returns the position within the group, if known.
    #[must_use]
    pub const fn position(&self) -> Option<Position> {
        self.position
    }

    /// Returns the owner, if recorded.
    #[must_use]
    pub const fn owner(&self) -> Option<&OwnerId> {
        self.owner.as_ref()
    }

    /// Returns the creation timestamp, if recorded.
    #[must_use]
    pub const fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Returns a copy of the task placed at `position`.
    #[must_use]
    pub fn at_position(&self, position: Position) -> Self {
        Self {
            position: Some(position),
            ..self.clone()
        }
    }

    /// Returns a copy of the task moved into the group `label`.
    #[must_use]
    pub fn in_group(&self, label: GroupLabel) -> Self {
        Self {
            label,
            ..self.clone()
        }
    }

    /// Applies `changes` in place. Unset fields are left untouched.
    pub fn apply(&mut self, changes: &TaskChanges) {
        if let Some(title) = &changes.title {
            self.title = title.clone();
        }
        if let Some(label) = &changes.label {
            self.label = label.clone();
        }
        if let Some(period) = changes.period {
            self.period = period;
        }
        if let Some(position) = changes.position {
            self.position = Some(position);
        }
    }

    /// Orders tasks for display inside one group.
    ///
    /// Positioned tasks come first, by position. Tasks without a position
    /// follow in creation order.
    #[must_use]
    pub fn display_order(&self, other: &Self) -> Ordering {
        self.position
            .is_none()
            .cmp(&other.position.is_none())
            .then_with(|| self.position.cmp(&other.position))
            .then_with(|| self.created_at.cmp(&other.created_at))
    }
}

/// A task row about to be inserted into the row-store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Identifier assigned to the new row.
    pub id: TaskId,
    /// Task title.
    pub title: TaskTitle,
    /// Destination group.
    pub label: GroupLabel,
    /// Display period.
    pub period: Period,
    /// Position, omitted when the store has no position column.
    pub position: Option<Position>,
    /// Owner, omitted when the store has no owner column.
    pub owner: Option<OwnerId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl NewTask {
    /// Converts the insert into the task it will become once stored.
    #[must_use]
    pub fn into_task(self) -> Task {
        Task::from_persisted(PersistedTaskData {
            id: self.id,
            title: self.title,
            label: self.label,
            period: self.period,
            position: self.position,
            owner: self.owner,
            created_at: Some(self.created_at),
        })
    }
}

/// Partial update of a task row. `None` fields are not written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    /// New title.
    pub title: Option<TaskTitle>,
    /// New group label.
    pub label: Option<GroupLabel>,
    /// New display period.
    pub period: Option<Period>,
    /// New position within the group.
    pub position: Option<Position>,
}

impl TaskChanges {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: TaskTitle) -> Self {
        self.title = Some(title);
        self
    }

    /// Sets the group label.
    #[must_use]
    pub fn with_label(mut self, label: GroupLabel) -> Self {
        self.label = Some(label);
        self
    }

    /// Sets the display period.
    #[must_use]
    pub const fn with_period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    /// Sets the position.
    #[must_use]
    pub const fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Returns `true` when no field would be written.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.label.is_none()
            && self.period.is_none()
            && self.position.is_none()
    }
}

/// A group with its tasks in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskGroup {
    /// Group label.
    pub label: GroupLabel,
    /// Member tasks in display order.
    pub tasks: Vec<Task>,
}
