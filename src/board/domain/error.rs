//! Error types for board domain validation and reordering.

use super::{GroupLabel, TaskId};
use std::fmt;
use thiserror::Error;

/// Errors returned while constructing board values or applying board
/// commands.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task title exceeds the maximum length.
    #[error("task title is {length} characters, maximum is {max}")]
    TitleTooLong {
        /// Character count of the trimmed title.
        length: usize,
        /// Maximum permitted character count.
        max: usize,
    },

    /// The group label is empty after trimming.
    #[error("group label must not be empty")]
    EmptyLabel,

    /// The group label exceeds the maximum length.
    #[error("group label is {length} characters, maximum is {max}")]
    LabelTooLong {
        /// Character count of the trimmed label.
        length: usize,
        /// Maximum permitted character count.
        max: usize,
    },

    /// The period ends before it starts.
    #[error("period end {end} is before start {start}")]
    InvalidPeriod {
        /// Period start date.
        start: chrono::NaiveDate,
        /// Period end date.
        end: chrono::NaiveDate,
    },

    /// The period text could not be parsed.
    #[error("malformed period '{0}', expected YYYY-MM-DD - YYYY-MM-DD")]
    MalformedPeriod(String),

    /// The owner identifier is empty.
    #[error("owner identifier must not be empty")]
    EmptyOwnerId,

    /// Positions are 1-based.
    #[error("invalid position {0}, expected a positive integer")]
    InvalidPosition(i64),

    /// A task submission contained no task rows.
    #[error("at least one task title is required")]
    EmptyBatch,

    /// The task is not present on the board.
    #[error("task not found on board: {0}")]
    TaskNotFound(TaskId),

    /// The group is not present in the group order.
    #[error("group not found: {0}")]
    UnknownGroup(GroupLabel),

    /// A group with the requested label already exists.
    #[error("group '{0}' already exists")]
    DuplicateGroup(GroupLabel),

    /// A drag is already in progress.
    #[error("a drag is already in progress")]
    DragInProgress,
}

/// A validation failure attached to the form field that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Form field key such as `label` or `title_2`.
    pub field: String,
    /// Validation failure for the field.
    pub error: BoardDomainError,
}

/// Validation failures collected across a form submission.
#[derive(Debug, Clone, Default, Error, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    /// Creates an empty error collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Records a failure for `field`.
    pub fn push(&mut self, field: impl Into<String>, error: BoardDomainError) {
        self.errors.push(FieldError {
            field: field.into(),
            error,
        });
    }

    /// Returns the failure recorded for `field`, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&BoardDomainError> {
        self.errors
            .iter()
            .find(|entry| entry.field == field)
            .map(|entry| &entry.error)
    }

    /// Returns `true` when no failure was recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of recorded failures.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterates over the recorded failures in submission order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Converts the collection into a result, failing when non-empty.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one failure was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for entry in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", entry.field, entry.error)?;
            first = false;
        }
        Ok(())
    }
}
