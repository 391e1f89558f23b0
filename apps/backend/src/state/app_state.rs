use std::sync::Arc;

use super::security_config::SecurityConfig;
use crate::auth::jwt::TokenIssuer;
use crate::credentials::{CredentialVerifier, InMemoryCredentials};

/// Application state shared by every worker
#[derive(Debug, Clone)]
pub struct AppState {
    /// Access token issuer/validator
    pub tokens: TokenIssuer,
    /// Resource-owner credential verification
    pub credentials: Arc<dyn CredentialVerifier>,
}

impl AppState {
    pub fn new(security: SecurityConfig, credentials: Arc<dyn CredentialVerifier>) -> Self {
        Self {
            tokens: TokenIssuer::new(security),
            credentials,
        }
    }

    /// State backed by an in-memory credential store.
    pub fn with_memory_credentials(
        security: SecurityConfig,
        credentials: Arc<InMemoryCredentials>,
    ) -> Self {
        Self::new(security, credentials)
    }
}
