//! Credential verification collaborator.
//!
//! The token endpoint only turns an already-authenticated identity into a
//! token; deciding whether a username/password pair is valid belongs to an
//! implementation of [`CredentialVerifier`].

use std::fmt;

use async_trait::async_trait;

use crate::auth::identity::UserIdentity;
use crate::error::AppError;

pub mod memory;

pub use memory::InMemoryCredentials;

/// Verifies resource-owner credentials.
#[async_trait]
pub trait CredentialVerifier: fmt::Debug + Send + Sync {
    /// Returns the identity owning these credentials, or `None` when the
    /// user is unknown or the password is wrong (the two are not
    /// distinguished). `Err` is reserved for infrastructure failures.
    async fn verify(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserIdentity>, AppError>;
}
