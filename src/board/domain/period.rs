//! Display period attached to each task.

use super::BoardDomainError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const DATE_FORMAT: &str = "%Y-%m-%d";
const SEPARATOR: &str = " - ";

/// Inclusive start/end date pair, end on or after start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    start: NaiveDate,
    end: NaiveDate,
}

impl Period {
    /// Creates a validated period.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidPeriod`] when `end` precedes
    /// `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, BoardDomainError> {
        if end < start {
            return Err(BoardDomainError::InvalidPeriod { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns the first day of the period.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Returns the last day of the period.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{SEPARATOR}{}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

impl FromStr for Period {
    type Err = BoardDomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let malformed = || BoardDomainError::MalformedPeriod(value.to_owned());
        let (start_text, end_text) = value.trim().split_once(SEPARATOR).ok_or_else(malformed)?;
        let start = NaiveDate::parse_from_str(start_text.trim(), DATE_FORMAT)
            .map_err(|_| malformed())?;
        let end =
            NaiveDate::parse_from_str(end_text.trim(), DATE_FORMAT).map_err(|_| malformed())?;
        Self::new(start, end)
    }
}
