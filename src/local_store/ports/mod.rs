//! Port contracts for client-local keyed storage.

pub mod key_value;

pub use key_value::{KeyValueError, KeyValueResult, KeyValueStore};
