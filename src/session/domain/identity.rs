//! Authenticated identity.

use crate::board::domain::OwnerId;

/// The signed-in user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    id: OwnerId,
    email: Option<String>,
}

impl Identity {
    /// Creates an identity.
    #[must_use]
    pub const fn new(id: OwnerId, email: Option<String>) -> Self {
        Self { id, email }
    }

    /// Returns the identifier used to own tasks and scope local storage.
    #[must_use]
    pub const fn id(&self) -> &OwnerId {
        &self.id
    }

    /// Returns the e-mail address, when the provider exposes one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}
