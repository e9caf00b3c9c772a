//! Task board: groups of ordered tasks rearranged by drag and drop.
//!
//! Drops are applied to the in-memory board immediately and persisted in the
//! background; a failed write reloads the board from the row-store. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
