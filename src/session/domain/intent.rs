//! Intent flag carried across an auth redirect.

use super::SessionDomainError;
use std::fmt;
use std::str::FromStr;

/// Why the next successful sign-in happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthIntent {
    /// The user just confirmed a new account.
    Signup,
    /// The user is completing a password reset.
    PasswordReset,
}

impl AuthIntent {
    /// Returns the stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Signup => "signup",
            Self::PasswordReset => "password_reset",
        }
    }

    /// Returns the sign-in outcome this intent announces.
    #[must_use]
    pub const fn outcome(self) -> SignInOutcome {
        match self {
            Self::Signup => SignInOutcome::SignupComplete,
            Self::PasswordReset => SignInOutcome::PasswordResetComplete,
        }
    }
}

impl fmt::Display for AuthIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthIntent {
    type Err = SessionDomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "signup" => Ok(Self::Signup),
            "password_reset" => Ok(Self::PasswordReset),
            other => Err(SessionDomainError::UnknownIntent(other.to_owned())),
        }
    }
}

/// What a completed sign-in means for the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInOutcome {
    /// An ordinary sign-in.
    Plain,
    /// First sign-in after account confirmation.
    SignupComplete,
    /// Sign-in that finishes a password reset.
    PasswordResetComplete,
}

/// Returns `true` when a redirect query string carries `reset=true`.
///
/// A leading `?` is ignored.
#[must_use]
pub fn reset_requested(query: &str) -> bool {
    let pairs = query.strip_prefix('?').unwrap_or(query);
    url::form_urlencoded::parse(pairs.as_bytes())
        .any(|(key, value)| key == "reset" && value == "true")
}
