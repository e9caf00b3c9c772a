//! Port contracts for the session module.

pub mod identity_provider;

pub use identity_provider::{IdentityError, IdentityProvider, IdentityResult};
