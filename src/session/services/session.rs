//! Session service: identity lookup, redirect intent, password recovery.

use crate::config::BoardConfig;
use crate::local_store::ports::{KeyValueError, KeyValueStore};
use crate::session::{
    domain::{AuthIntent, Identity, RecoveryTokens, SessionDomainError, SignInOutcome, reset_requested},
    ports::{IdentityError, IdentityProvider},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Service-level errors for session operations.
#[derive(Debug, Error)]
pub enum SessionServiceError {
    /// Domain interpretation failed.
    #[error(transparent)]
    Domain(#[from] SessionDomainError),
    /// The identity provider failed.
    #[error(transparent)]
    Identity(#[from] IdentityError),
    /// Client-local storage failed.
    #[error(transparent)]
    LocalStore(#[from] KeyValueError),
}

/// Result type for session service operations.
pub type SessionServiceResult<T> = Result<T, SessionServiceError>;

/// Session orchestration over an identity provider and local storage.
#[derive(Debug)]
pub struct SessionService<P, K>
where
    P: IdentityProvider,
    K: KeyValueStore,
{
    provider: Arc<P>,
    store: Arc<K>,
    intent_key: String,
}

impl<P, K> SessionService<P, K>
where
    P: IdentityProvider,
    K: KeyValueStore,
{
    /// Creates a session service storing the intent flag under the
    /// configured key.
    #[must_use]
    pub fn new(provider: Arc<P>, store: Arc<K>, config: &BoardConfig) -> Self {
        Self {
            provider,
            store,
            intent_key: config.storage.auth_intent_key.clone(),
        }
    }

    /// Returns the signed-in identity, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SessionServiceError::Identity`] when the provider fails.
    pub async fn current_identity(&self) -> SessionServiceResult<Option<Identity>> {
        Ok(self.provider.current_identity().await?)
    }

    /// Remembers why the next sign-in will happen.
    ///
    /// # Errors
    ///
    /// Returns [`SessionServiceError::LocalStore`] when the flag cannot be
    /// stored.
    pub fn mark_intent(&self, intent: AuthIntent) -> SessionServiceResult<()> {
        self.store.set(&self.intent_key, intent.as_str())?;
        debug!(%intent, "auth intent stored");
        Ok(())
    }

    /// Inspects the query string of an auth redirect and records a
    /// password-reset intent when it carries `reset=true`.
    ///
    /// Returns `true` when an intent was recorded.
    ///
    /// # Errors
    ///
    /// Returns [`SessionServiceError::LocalStore`] when the flag cannot be
    /// stored.
    pub fn note_redirect_query(&self, query: &str) -> SessionServiceResult<bool> {
        if !reset_requested(query) {
            return Ok(false);
        }
        self.mark_intent(AuthIntent::PasswordReset)?;
        Ok(true)
    }

    /// Consumes the intent flag after a successful sign-in.
    ///
    /// A recognised flag is removed and reported; an unrecognised one is
    /// left in place and the sign-in is treated as ordinary.
    ///
    /// # Errors
    ///
    /// Returns [`SessionServiceError::LocalStore`] when storage fails.
    pub fn on_signed_in(&self) -> SessionServiceResult<SignInOutcome> {
        let Some(raw) = self.store.get(&self.intent_key)? else {
            return Ok(SignInOutcome::Plain);
        };
        match raw.parse::<AuthIntent>() {
            Ok(intent) => {
                self.store.remove(&self.intent_key)?;
                info!(%intent, "auth intent consumed");
                Ok(intent.outcome())
            }
            Err(err) => {
                warn!(error = %err, "ignoring stored auth intent");
                Ok(SignInOutcome::Plain)
            }
        }
    }

    /// Opens a recovery session when `fragment` carries recovery tokens.
    ///
    /// Returns `Ok(None)` when the fragment is not a recovery redirect.
    ///
    /// # Errors
    ///
    /// Returns [`SessionServiceError::Identity`] when the provider refuses
    /// the tokens.
    pub async fn complete_recovery(&self, fragment: &str) -> SessionServiceResult<Option<Identity>> {
        let Some(tokens) = RecoveryTokens::from_fragment(fragment) else {
            debug!("redirect fragment carries no recovery tokens");
            return Ok(None);
        };
        match self.provider.establish_recovery_session(tokens).await {
            Ok(identity) => {
                info!(owner = %identity.id(), "recovery session established");
                Ok(Some(identity))
            }
            Err(err) => {
                warn!(error = %err, "recovery session rejected");
                Err(err.into())
            }
        }
    }

    /// Ends the current session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionServiceError::Identity`] when the provider fails.
    pub async fn sign_out(&self) -> SessionServiceResult<()> {
        if let Err(err) = self.provider.sign_out().await {
            warn!(error = %err, "sign-out failed");
            return Err(err.into());
        }
        info!("signed out");
        Ok(())
    }
}
