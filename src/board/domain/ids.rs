//! Identifier and validated scalar types for the board domain.

use super::BoardDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a task row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a new random task identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a task identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identity of the authenticated user owning tasks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    /// Creates an owner identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyOwnerId`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(BoardDomainError::EmptyOwnerId);
        }
        Ok(Self(raw))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trims `value` and checks its character count against `max`.
fn bounded_text(value: &str, max: usize) -> Result<String, (usize, bool)> {
    let trimmed = value.trim();
    let length = trimmed.chars().count();
    if length == 0 {
        return Err((0, true));
    }
    if length > max {
        return Err((length, false));
    }
    Ok(trimmed.to_owned())
}

/// Task title, 1 to 100 characters after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Maximum title length in characters.
    pub const MAX_CHARS: usize = 100;

    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTitle`] or
    /// [`BoardDomainError::TitleTooLong`].
    pub fn new(value: impl AsRef<str>) -> Result<Self, BoardDomainError> {
        bounded_text(value.as_ref(), Self::MAX_CHARS)
            .map(Self)
            .map_err(|(length, empty)| {
                if empty {
                    BoardDomainError::EmptyTitle
                } else {
                    BoardDomainError::TitleTooLong {
                        length,
                        max: Self::MAX_CHARS,
                    }
                }
            })
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Group label, 1 to 15 characters after trimming. Labels identify groups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GroupLabel(String);

impl GroupLabel {
    /// Maximum label length in characters.
    pub const MAX_CHARS: usize = 15;

    /// Creates a validated label.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyLabel`] or
    /// [`BoardDomainError::LabelTooLong`].
    pub fn new(value: impl AsRef<str>) -> Result<Self, BoardDomainError> {
        bounded_text(value.as_ref(), Self::MAX_CHARS)
            .map(Self)
            .map_err(|(length, empty)| {
                if empty {
                    BoardDomainError::EmptyLabel
                } else {
                    BoardDomainError::LabelTooLong {
                        length,
                        max: Self::MAX_CHARS,
                    }
                }
            })
    }

    /// Returns the label as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for GroupLabel {
    type Error = BoardDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<GroupLabel> for String {
    fn from(label: GroupLabel) -> Self {
        label.0
    }
}

impl AsRef<str> for GroupLabel {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for GroupLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 1-based display rank of a task within its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(u32);

impl Position {
    /// The first position in a group.
    pub const FIRST: Self = Self(1);

    /// Creates a validated position.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidPosition`] for zero.
    pub const fn new(value: u32) -> Result<Self, BoardDomainError> {
        if value == 0 {
            return Err(BoardDomainError::InvalidPosition(0));
        }
        Ok(Self(value))
    }

    /// Returns the position for a zero-based list index.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        let rank = u32::try_from(index).map_or(u32::MAX, |value| value.saturating_add(1));
        Self(rank)
    }

    /// Returns the position following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl TryFrom<i32> for Position {
    type Error = BoardDomainError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .map_err(|_| BoardDomainError::InvalidPosition(i64::from(value)))
            .and_then(Self::new)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
