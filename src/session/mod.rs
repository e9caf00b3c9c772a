//! Signed-in identity and the auth redirect handshake.
//!
//! Authentication itself is delegated to an external identity provider.
//! This module tracks the current identity, carries a short-lived intent
//! flag across full-page auth redirects, and turns a password-recovery
//! redirect fragment into a recovery session.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
