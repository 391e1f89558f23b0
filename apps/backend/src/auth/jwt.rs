//! Access token issuance and validation.
//!
//! Tokens are compact HS256 JWTs carrying a [`ClaimSet`]. Issuance and
//! validation are pure functions of their inputs and the immutable signing
//! key, so a single [`TokenIssuer`] is shared by every worker.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{
    crypto, dangerous, decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header,
    Validation,
};
use thiserror::Error;
use time::{Duration, OffsetDateTime};
use tracing::debug;

use super::claims::{ClaimSet, DecodeError};
use super::identity::UserIdentity;
use super::token::AccessToken;
use crate::state::security_config::SecurityConfig;

/// The only accepted signing algorithm.
pub const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

/// Lifetime of every access token.
pub const ACCESS_TOKEN_TTL: Duration = Duration::hours(72);

/// [`ACCESS_TOKEN_TTL`] in seconds, as reported in `expires_in`.
pub const ACCESS_TOKEN_TTL_SECS: u64 = 72 * 60 * 60;

/// `token_type` of every issued token (RFC 6750).
pub const TOKEN_TYPE: &str = "Bearer";

#[derive(Debug, Error)]
pub enum IssueError {
    #[error("failed to sign access token: {detail}")]
    SigningFailure { detail: String },
}

/// Why an inbound token was rejected.
///
/// The distinction is for logs only; callers see a single unauthorized
/// outcome.
#[derive(Debug, Error)]
pub enum ValidateError {
    /// Signature, algorithm or token structure could not be verified.
    #[error("access token could not be verified")]
    InvalidSignature,
    #[error("access token has expired")]
    Expired,
    /// Verified token whose subject is not a user identity.
    #[error(transparent)]
    MalformedSubject(#[from] DecodeError),
}

impl ValidateError {
    /// Stable label for structured logs.
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidSignature => "invalid_signature",
            Self::Expired => "token_expired",
            Self::MalformedSubject(_) => "malformed_subject",
        }
    }
}

/// Issues and validates access tokens with a single HMAC key.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    security: SecurityConfig,
    validation: Validation,
}

impl TokenIssuer {
    pub fn new(security: SecurityConfig) -> Self {
        let mut validation = Validation::new(TOKEN_ALGORITHM);
        // Expiry is checked against the caller's clock with no leeway.
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;

        Self {
            security,
            validation,
        }
    }

    /// Mint a bearer token for `identity`, valid for [`ACCESS_TOKEN_TTL`] from `now`.
    pub fn issue(
        &self,
        identity: UserIdentity,
        now: OffsetDateTime,
    ) -> Result<AccessToken, IssueError> {
        if !self.security.has_secret() {
            return Err(IssueError::SigningFailure {
                detail: "signing key is empty".to_string(),
            });
        }

        let expires_at = now
            .checked_add(ACCESS_TOKEN_TTL)
            .ok_or_else(|| IssueError::SigningFailure {
                detail: format!("expiry overflows for issue time {now}"),
            })?;

        let claims = ClaimSet::encode(identity, expires_at);

        let token = encode(
            &Header::new(TOKEN_ALGORITHM),
            &claims,
            &EncodingKey::from_secret(&self.security.jwt_secret),
        )
        .map_err(|e| IssueError::SigningFailure {
            detail: format!("failed to encode JWT: {e}"),
        })?;

        Ok(AccessToken::bearer(token, ACCESS_TOKEN_TTL_SECS))
    }

    /// Verify `token` and recover the identity it was issued for.
    ///
    /// The signature and algorithm are verified before any claim is
    /// looked at. The token is expired unless `exp` is strictly after `now`.
    pub fn validate(
        &self,
        token: &str,
        now: OffsetDateTime,
    ) -> Result<UserIdentity, ValidateError> {
        if !self.security.has_secret() {
            return Err(ValidateError::InvalidSignature);
        }

        let key = DecodingKey::from_secret(&self.security.jwt_secret);
        let claims = match decode::<ClaimSet>(token, &key, &self.validation) {
            Ok(data) => data.claims,
            // jsonwebtoken's own claim checks cannot read a non-string `sub`.
            Err(e) if matches!(e.kind(), ErrorKind::Json(_)) => {
                verified_claims(token, &key).ok_or_else(|| {
                    debug!(kind = ?e.kind(), "access token failed verification");
                    ValidateError::InvalidSignature
                })?
            }
            Err(e) => {
                debug!(kind = ?e.kind(), "access token failed verification");
                return Err(ValidateError::InvalidSignature);
            }
        };

        if claims.exp <= now.unix_timestamp() {
            return Err(ValidateError::Expired);
        }

        Ok(claims.decode()?)
    }
}

/// Claims of a token whose HS256 signature checks out but whose payload
/// `decode` refused. `None` unless the signature is valid and the payload
/// still fits [`ClaimSet`].
fn verified_claims(token: &str, key: &DecodingKey) -> Option<ClaimSet> {
    let (message, signature) = token.rsplit_once('.')?;
    if decode_header(token).ok()?.alg != TOKEN_ALGORITHM {
        return None;
    }
    if !crypto::verify(signature, message.as_bytes(), key, TOKEN_ALGORITHM).ok()? {
        return None;
    }
    dangerous::insecure_decode::<ClaimSet>(token)
        .ok()
        .map(|data| data.claims)
}
