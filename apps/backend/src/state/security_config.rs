use std::fmt;

/// Configuration for JWT security settings.
///
/// Built once at startup and moved into the [`TokenIssuer`]; never mutated.
///
/// [`TokenIssuer`]: crate::auth::jwt::TokenIssuer
#[derive(Clone)]
pub struct SecurityConfig {
    /// HMAC secret for signing and verifying tokens
    pub jwt_secret: Vec<u8>,
}

impl SecurityConfig {
    /// Create a new SecurityConfig with the given JWT secret
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
        }
    }

    /// Whether the configured secret can sign tokens at all.
    pub fn has_secret(&self) -> bool {
        !self.jwt_secret.is_empty()
    }
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &format_args!("<{} bytes>", self.jwt_secret.len()))
            .finish()
    }
}
