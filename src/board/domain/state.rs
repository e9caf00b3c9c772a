//! Ordered board model: per-group task sequences and the global group order.
//!
//! [`BoardState`] is a plain value. Every command returns a new state, which
//! lets callers compute an optimistic update, swap it in atomically, and fall
//! back to a reloaded state when persistence fails.

use super::{BoardDomainError, GroupLabel, Position, Task, TaskChanges, TaskGroup, TaskId};
use std::collections::HashSet;

/// New position assigned to a task by a reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionChange {
    /// Task whose position changed.
    pub task_id: TaskId,
    /// Position after the reorder.
    pub position: Position,
}

/// Result of moving one task, within its group or across groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskReorder {
    /// Board state after the move.
    pub state: BoardState,
    /// The moved task.
    pub task_id: TaskId,
    /// Group the task left.
    pub from: GroupLabel,
    /// Group the task landed in.
    pub to: GroupLabel,
    /// Final position of the moved task.
    pub moved_position: Position,
    /// Destination members, other than the moved task, whose position
    /// changed. For a same-group reorder this covers the moved task too.
    pub destination_changes: Vec<PositionChange>,
    /// Source members whose position changed. Empty for a same-group reorder.
    pub source_changes: Vec<PositionChange>,
}

impl TaskReorder {
    /// Returns `true` when the task changed group.
    #[must_use]
    pub fn is_cross_group(&self) -> bool {
        self.from != self.to
    }
}

/// Resolves a raw insertion index into the final index of a dragged item.
///
/// `raw` is an index into the sequence with the dragged item excluded, as
/// produced by pointer targeting. When the dragged item sat before `raw`, the
/// index is shifted by one to account for the closed gap. Returns `None` when
/// the item would land where it already is.
#[must_use]
pub fn resolve_insertion(current: usize, raw: usize) -> Option<usize> {
    let adjusted = if current < raw { raw + 1 } else { raw };
    if current == adjusted || adjusted.checked_sub(1) == Some(current) {
        return None;
    }
    if adjusted > current {
        Some(adjusted - 1)
    } else {
        Some(adjusted)
    }
}

const PLACEHOLDER_LABEL: &str = "New group";

fn placeholder_candidate(counter: usize) -> Option<GroupLabel> {
    if counter == 0 {
        return GroupLabel::new(PLACEHOLDER_LABEL).ok();
    }
    [
        format!("{PLACEHOLDER_LABEL}{counter}"),
        format!("Group{counter}"),
        format!("G{counter}"),
    ]
    .into_iter()
    .find(|name| name.chars().count() <= GroupLabel::MAX_CHARS)
    .and_then(|name| GroupLabel::new(name).ok())
}

/// Tasks and group order for one signed-in identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardState {
    tasks: Vec<Task>,
    group_order: Vec<GroupLabel>,
}

impl BoardState {
    /// Builds a board from loaded tasks and a previously stored group order.
    ///
    /// Stored labels keep their rank; labels seen only on tasks are appended
    /// in load order.
    #[must_use]
    pub fn new(tasks: Vec<Task>, stored_order: Vec<GroupLabel>) -> Self {
        let group_order = merge_group_order(stored_order, &tasks);
        Self { tasks, group_order }
    }

    /// Returns every task in load order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the group labels in display order.
    #[must_use]
    pub fn group_order(&self) -> &[GroupLabel] {
        &self.group_order
    }

    /// Returns `true` when `label` names a group on the board.
    #[must_use]
    pub fn has_group(&self, label: &GroupLabel) -> bool {
        self.group_order.contains(label)
    }

    /// Looks a task up by identifier.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Returns the members of `label` in display order.
    #[must_use]
    pub fn group_tasks(&self, label: &GroupLabel) -> Vec<&Task> {
        let mut members: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|task| task.label() == label)
            .collect();
        members.sort_by(|left, right| left.display_order(right));
        members
    }

    /// Returns every group, including empty ones, in group order.
    #[must_use]
    pub fn groups(&self) -> Vec<TaskGroup> {
        self.group_order
            .iter()
            .map(|label| TaskGroup {
                label: label.clone(),
                tasks: self.group_tasks(label).into_iter().cloned().collect(),
            })
            .collect()
    }

    /// Returns the group and display index of a task.
    #[must_use]
    pub fn locate(&self, id: TaskId) -> Option<(GroupLabel, usize)> {
        let label = self.task(id)?.label().clone();
        let index = self
            .group_tasks(&label)
            .iter()
            .position(|task| task.id() == id)?;
        Some((label, index))
    }

    /// Returns the position a task appended to `label` should take.
    #[must_use]
    pub fn next_position(&self, label: &GroupLabel) -> Position {
        let members = self.group_tasks(label);
        let highest = members
            .iter()
            .filter_map(|task| task.position())
            .map(|position| usize::try_from(position.value()).unwrap_or(usize::MAX))
            .max()
            .unwrap_or(0);
        Position::from_index(highest.max(members.len()))
    }

    /// Returns a board with `tasks` replacing the current tasks while keeping
    /// the group order.
    #[must_use]
    pub fn with_tasks(&self, tasks: Vec<Task>) -> Self {
        Self::new(tasks, self.group_order.clone())
    }

    /// Returns a board using `order` as group order. Labels still carried by
    /// tasks but missing from `order` are appended.
    #[must_use]
    pub fn with_group_order(&self, order: Vec<GroupLabel>) -> Self {
        Self::new(self.tasks.clone(), order)
    }

    /// Moves a task inside its own group.
    ///
    /// `raw_index` is the insertion index computed with the dragged task
    /// excluded. Returns `Ok(None)` when the drop leaves the order unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskNotFound`] when the task is not on the
    /// board.
    pub fn reorder_within_group(
        &self,
        task_id: TaskId,
        raw_index: usize,
    ) -> Result<Option<TaskReorder>, BoardDomainError> {
        let (label, current) = self
            .locate(task_id)
            .ok_or(BoardDomainError::TaskNotFound(task_id))?;
        let mut members: Vec<Task> = self.group_tasks(&label).into_iter().cloned().collect();
        let visible = members.len().saturating_sub(1);
        let Some(target) = resolve_insertion(current, raw_index.min(visible)) else {
            return Ok(None);
        };

        let moved = members.remove(current);
        let insert_at = target.min(members.len());
        members.insert(insert_at, moved);
        let (renumbered, changes) = renumber(members);

        Ok(Some(TaskReorder {
            state: self.with_group_members(&[&label], renumbered),
            task_id,
            from: label.clone(),
            to: label,
            moved_position: Position::from_index(insert_at),
            destination_changes: changes,
            source_changes: Vec::new(),
        }))
    }

    /// Moves a task into `destination` at `index`.
    ///
    /// `index` addresses the destination's current list and is clamped to
    /// its length. A drop onto the task's own group is resolved as
    /// [`Self::reorder_within_group`], returning `Ok(None)` when nothing moves.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskNotFound`] or
    /// [`BoardDomainError::UnknownGroup`].
    pub fn move_to_group(
        &self,
        task_id: TaskId,
        destination: &GroupLabel,
        index: usize,
    ) -> Result<Option<TaskReorder>, BoardDomainError> {
        let task = self
            .task(task_id)
            .ok_or(BoardDomainError::TaskNotFound(task_id))?;
        if !self.has_group(destination) {
            return Err(BoardDomainError::UnknownGroup(destination.clone()));
        }
        let source = task.label().clone();
        if &source == destination {
            return self.reorder_within_group(task_id, index);
        }

        let mut destination_members: Vec<Task> = self
            .group_tasks(destination)
            .into_iter()
            .cloned()
            .collect();
        let insert_at = index.min(destination_members.len());
        destination_members.insert(insert_at, task.in_group(destination.clone()));
        let (destination_renumbered, destination_changes) = renumber(destination_members);

        let source_members: Vec<Task> = self
            .group_tasks(&source)
            .into_iter()
            .filter(|member| member.id() != task_id)
            .cloned()
            .collect();
        let (source_renumbered, source_changes) = renumber(source_members);

        let mut affected = source_renumbered;
        affected.extend(destination_renumbered);

        Ok(Some(TaskReorder {
            state: self.with_group_members(&[&source, destination], affected),
            task_id,
            from: source,
            to: destination.clone(),
            moved_position: Position::from_index(insert_at),
            destination_changes: destination_changes
                .into_iter()
                .filter(|change| change.task_id != task_id)
                .collect(),
            source_changes,
        }))
    }

    /// Moves a group to a new rank.
    ///
    /// `raw_index` is the insertion index computed with the dragged group
    /// excluded. Returns `Ok(None)` when the order is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::UnknownGroup`] when `label` is not on the
    /// board.
    pub fn reorder_groups(
        &self,
        label: &GroupLabel,
        raw_index: usize,
    ) -> Result<Option<Self>, BoardDomainError> {
        let current = self
            .group_order
            .iter()
            .position(|candidate| candidate == label)
            .ok_or_else(|| BoardDomainError::UnknownGroup(label.clone()))?;
        let visible = self.group_order.len().saturating_sub(1);
        let Some(target) = resolve_insertion(current, raw_index.min(visible)) else {
            return Ok(None);
        };

        let mut order = self.group_order.clone();
        let moved = order.remove(current);
        let insert_at = target.min(order.len());
        order.insert(insert_at, moved);
        Ok(Some(Self {
            tasks: self.tasks.clone(),
            group_order: order,
        }))
    }

    /// Adds an empty group at the end of the group order.
    ///
    /// Returns `None` when the group already exists.
    #[must_use]
    pub fn with_empty_group(&self, label: GroupLabel) -> Option<Self> {
        if self.has_group(&label) {
            return None;
        }
        let mut order = self.group_order.clone();
        order.push(label);
        Some(Self {
            tasks: self.tasks.clone(),
            group_order: order,
        })
    }

    /// Renames a group, rewriting the label of every member.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::DuplicateGroup`] when `new_label` is taken
    /// by another group, or [`BoardDomainError::UnknownGroup`] when `old_label`
    /// does not exist.
    pub fn with_group_renamed(
        &self,
        old_label: &GroupLabel,
        new_label: &GroupLabel,
    ) -> Result<Self, BoardDomainError> {
        if old_label == new_label {
            return Ok(self.clone());
        }
        if self.has_group(new_label) {
            return Err(BoardDomainError::DuplicateGroup(new_label.clone()));
        }
        if !self.has_group(old_label) {
            return Err(BoardDomainError::UnknownGroup(old_label.clone()));
        }

        let tasks = self
            .tasks
            .iter()
            .map(|task| {
                if task.label() == old_label {
                    task.in_group(new_label.clone())
                } else {
                    task.clone()
                }
            })
            .collect();
        let group_order = self
            .group_order
            .iter()
            .map(|label| {
                if label == old_label {
                    new_label.clone()
                } else {
                    label.clone()
                }
            })
            .collect();
        Ok(Self { tasks, group_order })
    }

    /// Removes a group together with its members. Removing an unknown group
    /// returns an identical board.
    #[must_use]
    pub fn without_group(&self, label: &GroupLabel) -> Self {
        Self {
            tasks: self
                .tasks
                .iter()
                .filter(|task| task.label() != label)
                .cloned()
                .collect(),
            group_order: self
                .group_order
                .iter()
                .filter(|candidate| *candidate != label)
                .cloned()
                .collect(),
        }
    }

    /// Picks an unused placeholder label for a freshly added group.
    ///
    /// Tries `New group`, then `New group1`, `New group2` and so on. Once
    /// the numbered name no longer fits a label, `Group<n>` and then `G<n>`
    /// are used instead.
    #[must_use]
    pub fn placeholder_label(&self) -> GroupLabel {
        let mut counter: usize = 0;
        loop {
            if let Some(label) =
                placeholder_candidate(counter).filter(|candidate| !self.has_group(candidate))
            {
                return label;
            }
            counter = counter.saturating_add(1);
        }
    }

    /// Removes a single task.
    #[must_use]
    pub fn without_task(&self, id: TaskId) -> Self {
        Self {
            tasks: self
                .tasks
                .iter()
                .filter(|task| task.id() != id)
                .cloned()
                .collect(),
            group_order: self.group_order.clone(),
        }
    }

    /// Applies `changes` to one task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskNotFound`] when the task is missing.
    pub fn with_task_changes(
        &self,
        id: TaskId,
        changes: &TaskChanges,
    ) -> Result<Self, BoardDomainError> {
        if self.task(id).is_none() {
            return Err(BoardDomainError::TaskNotFound(id));
        }
        let tasks = self
            .tasks
            .iter()
            .map(|task| {
                let mut updated = task.clone();
                if updated.id() == id {
                    updated.apply(changes);
                }
                updated
            })
            .collect();
        Ok(Self::new(tasks, self.group_order.clone()))
    }

    /// Replaces the members of `labels` with `members`, leaving every other
    /// group untouched.
    fn with_group_members(&self, labels: &[&GroupLabel], members: Vec<Task>) -> Self {
        let mut tasks: Vec<Task> = self
            .tasks
            .iter()
            .filter(|task| !labels.contains(&task.label()))
            .cloned()
            .collect();
        tasks.extend(members);
        Self {
            tasks,
            group_order: self.group_order.clone(),
        }
    }
}

/// Assigns positions 1..N in list order, reporting tasks whose position
/// changed.
fn renumber(members: Vec<Task>) -> (Vec<Task>, Vec<PositionChange>) {
    let mut changes = Vec::new();
    let renumbered = members
        .into_iter()
        .enumerate()
        .map(|(index, task)| {
            let position = Position::from_index(index);
            if task.position() != Some(position) {
                changes.push(PositionChange {
                    task_id: task.id(),
                    position,
                });
            }
            task.at_position(position)
        })
        .collect();
    (renumbered, changes)
}

fn merge_group_order(stored: Vec<GroupLabel>, tasks: &[Task]) -> Vec<GroupLabel> {
    let mut seen = HashSet::new();
    let mut order = Vec::with_capacity(stored.len());
    for label in stored {
        if seen.insert(label.clone()) {
            order.push(label);
        }
    }
    for task in tasks {
        if seen.insert(task.label().clone()) {
            order.push(task.label().clone());
        }
    }
    order
}
