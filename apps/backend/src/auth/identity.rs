//! Stable identity of an authenticated principal.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque, globally unique identifier of an authenticated user.
///
/// Produced by credential verification and carried inside access tokens as
/// the `sub` claim in its canonical hyphenated form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserIdentity(Uuid);

impl UserIdentity {
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Mint a fresh random identity.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for UserIdentity {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for UserIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for UserIdentity {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// JSON view of the caller's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    pub user_id: UserIdentity,
}

impl From<UserIdentity> for AuthenticatedUser {
    fn from(user_id: UserIdentity) -> Self {
        Self { user_id }
    }
}
