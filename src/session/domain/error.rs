//! Error types for session domain validation.

use thiserror::Error;

/// Errors returned while interpreting session state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionDomainError {
    /// The stored auth intent flag holds an unknown value.
    #[error("unknown auth intent: {0}")]
    UnknownIntent(String),
}
