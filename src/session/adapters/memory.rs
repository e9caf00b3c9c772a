//! In-memory identity provider for tests and local use.

use crate::session::{
    domain::{Identity, RecoveryTokens},
    ports::{IdentityError, IdentityProvider, IdentityResult},
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug, Default)]
struct ProviderState {
    current: Option<Identity>,
    recovery: HashMap<String, Identity>,
}

/// Thread-safe identity provider holding sessions in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityProvider {
    state: Arc<RwLock<ProviderState>>,
}

impl InMemoryIdentityProvider {
    /// Creates a provider with nobody signed in.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Signs `identity` in.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Persistence`] when the lock is poisoned.
    pub fn sign_in(&self, identity: Identity) -> IdentityResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.current = Some(identity);
        Ok(())
    }

    /// Accepts `access_token` as a recovery token for `identity`.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Persistence`] when the lock is poisoned.
    pub fn issue_recovery_token(
        &self,
        access_token: impl Into<String>,
        identity: Identity,
    ) -> IdentityResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.recovery.insert(access_token.into(), identity);
        Ok(())
    }
}

fn lock_error<T>(err: PoisonError<T>) -> IdentityError {
    IdentityError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn current_identity(&self) -> IdentityResult<Option<Identity>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.current.clone())
    }

    async fn establish_recovery_session(
        &self,
        tokens: RecoveryTokens,
    ) -> IdentityResult<Identity> {
        let mut state = self.state.write().map_err(lock_error)?;
        let identity = state
            .recovery
            .remove(tokens.access_token())
            .ok_or_else(|| IdentityError::Rejected("unknown recovery token".to_owned()))?;
        state.current = Some(identity.clone());
        Ok(identity)
    }

    async fn sign_out(&self) -> IdentityResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.current = None;
        Ok(())
    }
}
