//! In-memory credential store for development and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::CredentialVerifier;
use crate::auth::identity::UserIdentity;
use crate::error::AppError;

#[derive(Debug, Clone)]
struct Account {
    identity: UserIdentity,
    password_digest: blake3::Hash,
}

/// Username → account map.
///
/// Passwords are held only as blake3 digests; `blake3::Hash` equality is
/// constant-time.
#[derive(Debug, Default)]
pub struct InMemoryCredentials {
    accounts: RwLock<HashMap<String, Account>>,
}

impl InMemoryCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `username` under a freshly generated identity.
    pub fn register(&self, username: &str, password: &str) -> UserIdentity {
        let identity = UserIdentity::generate();
        self.register_with_identity(username, password, identity);
        identity
    }

    /// Register (or replace) `username` with a known identity.
    pub fn register_with_identity(
        &self,
        username: &str,
        password: &str,
        identity: UserIdentity,
    ) {
        self.accounts.write().insert(
            normalize_username(username),
            Account {
                identity,
                password_digest: blake3::hash(password.as_bytes()),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.accounts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.read().is_empty()
    }
}

fn normalize_username(username: &str) -> String {
    username.trim().to_string()
}

#[async_trait]
impl CredentialVerifier for InMemoryCredentials {
    async fn verify(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserIdentity>, AppError> {
        let digest = blake3::hash(password.as_bytes());
        let accounts = self.accounts.read();

        Ok(accounts
            .get(&normalize_username(username))
            .filter(|account| account.password_digest == digest)
            .map(|account| account.identity))
    }
}
