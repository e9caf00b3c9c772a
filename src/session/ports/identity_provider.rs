//! External identity provider port.

use crate::session::domain::{Identity, RecoveryTokens};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for identity provider operations.
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Hosted authentication backend.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns the signed-in identity, if any.
    async fn current_identity(&self) -> IdentityResult<Option<Identity>>;

    /// Opens a session from password-recovery tokens.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Rejected`] when the provider refuses the
    /// tokens.
    async fn establish_recovery_session(&self, tokens: RecoveryTokens)
    -> IdentityResult<Identity>;

    /// Ends the current session.
    async fn sign_out(&self) -> IdentityResult<()>;
}

/// Errors returned by identity provider implementations.
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    /// The provider refused the request.
    #[error("identity provider rejected the request: {0}")]
    Rejected(String),

    /// Transport or backend failure.
    #[error("identity provider error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl IdentityError {
    /// Wraps a backend error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
