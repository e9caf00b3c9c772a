//! Adapter implementations for client-local keyed storage.

pub mod file;
pub mod memory;
