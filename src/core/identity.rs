//! Identity collaborator contract

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wrap a user identifier, returning `None` for a blank one
    #[must_use]
    pub fn new(id: &str) -> Option<Self> {
        let trimmed = id.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    /// The identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who is signed in, as reported by the identity provider
pub trait Identity {
    /// The signed-in user, or `None` when nobody is signed in
    fn current_user_id(&self) -> Option<UserId>;

    /// End the current session with the provider
    fn sign_out(&mut self);
}

/// Identity fixed at construction, e.g. the user named in the configuration
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    user: Option<UserId>,
}

impl StaticIdentity {
    /// Identity for `user`; a blank id means signed out
    #[must_use]
    pub fn new(user: &str) -> Self {
        Self {
            user: UserId::new(user),
        }
    }

    /// Nobody signed in
    #[must_use]
    pub const fn signed_out() -> Self {
        Self { user: None }
    }
}

impl Identity for StaticIdentity {
    fn current_user_id(&self) -> Option<UserId> {
        self.user.clone()
    }

    fn sign_out(&mut self) {
        self.user = None;
    }
}
