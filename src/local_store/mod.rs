//! Client-local keyed storage.
//!
//! A small string-keyed store scoped to one client installation. The board
//! keeps each identity's group order here, and the session layer uses it to
//! carry an auth intent flag across a full-page redirect.

pub mod adapters;
pub mod ports;
