//! Taskboard: a drag-and-drop task board core.
//!
//! Tasks are grouped under short labels and ordered by explicit positions.
//! Drops are applied to the in-memory board at once and written to a hosted
//! row-store in the background; a failed write reloads the board from the
//! store.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, files, memory)
//!
//! # Modules
//!
//! - [`board`]: Task groups, pointer targeting, and optimistic reordering
//! - [`session`]: Signed-in identity and auth redirect handling
//! - [`local_store`]: Client-local key-value storage
//! - [`config`]: TOML configuration

pub mod board;
pub mod config;
pub mod local_store;
pub mod session;
