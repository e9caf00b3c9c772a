//! Password-recovery tokens delivered in a redirect fragment.

use std::fmt;

const RECOVERY_TYPE: &str = "recovery";

/// Token pair that lets the identity provider open a recovery session.
#[derive(Clone, PartialEq, Eq)]
pub struct RecoveryTokens {
    access_token: String,
    refresh_token: String,
}

impl RecoveryTokens {
    /// Creates a token pair.
    #[must_use]
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }

    /// Extracts recovery tokens from a URL fragment such as
    /// `#type=recovery&access_token=..&refresh_token=..`.
    ///
    /// Returns `None` unless the fragment is of type `recovery` and carries
    /// both tokens. A leading `#` is ignored.
    #[must_use]
    pub fn from_fragment(fragment: &str) -> Option<Self> {
        let pairs = fragment.strip_prefix('#').unwrap_or(fragment);
        let mut kind = None;
        let mut access_token = None;
        let mut refresh_token = None;
        for (key, value) in url::form_urlencoded::parse(pairs.as_bytes()) {
            match key.as_ref() {
                "type" => kind = Some(value.into_owned()),
                "access_token" => access_token = Some(value.into_owned()),
                "refresh_token" => refresh_token = Some(value.into_owned()),
                _ => {}
            }
        }
        if kind.as_deref() != Some(RECOVERY_TYPE) {
            return None;
        }
        Some(Self {
            access_token: access_token.filter(|token| !token.is_empty())?,
            refresh_token: refresh_token.filter(|token| !token.is_empty())?,
        })
    }

    /// Returns the access token.
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Returns the refresh token.
    #[must_use]
    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }
}

impl fmt::Debug for RecoveryTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecoveryTokens")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}
