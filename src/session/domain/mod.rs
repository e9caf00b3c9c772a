//! Session domain types.

mod error;
mod identity;
mod intent;
mod recovery;

pub use error::SessionDomainError;
pub use identity::Identity;
pub use intent::{AuthIntent, SignInOutcome, reset_requested};
pub use recovery::RecoveryTokens;
