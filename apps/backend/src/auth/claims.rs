//! Identity codec: conversion between a [`UserIdentity`] and the claim set
//! carried inside an access token.
//!
//! The codec knows nothing about signing or clocks. Expiry is checked by
//! the validator in [`crate::auth::jwt`].

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use time::OffsetDateTime;

use super::identity::UserIdentity;

/// Registered JWT claims (RFC 7519 §4.1).
///
/// Only `sub` and `exp` are produced by this service; the rest are accepted
/// when present and omitted from the payload when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSet {
    /// Canonical string form of the user's identity
    #[serde(default, deserialize_with = "subject_text")]
    pub sub: String,
    /// Expiry (seconds since epoch)
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    /// Issued-at (seconds since epoch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Not-before (seconds since epoch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

/// Accept any JSON `sub`. A signed token with a non-string subject must
/// still reach [`ClaimSet::decode`] and fail there as a malformed subject.
fn subject_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("subject {subject:?} is not a valid user identity")]
    MalformedSubject {
        subject: String,
        #[source]
        source: uuid::Error,
    },
}

impl ClaimSet {
    /// Build the claims for `identity`, expiring at `expires_at`.
    pub fn encode(identity: UserIdentity, expires_at: OffsetDateTime) -> Self {
        Self {
            sub: identity.to_string(),
            exp: expires_at.unix_timestamp(),
            iss: None,
            aud: None,
            iat: None,
            nbf: None,
            jti: None,
        }
    }

    /// Recover the identity named by `sub`.
    pub fn decode(&self) -> Result<UserIdentity, DecodeError> {
        self.sub
            .parse()
            .map_err(|source| DecodeError::MalformedSubject {
                subject: self.sub.clone(),
                source,
            })
    }

    /// `exp` as a timestamp, or `None` when it is outside the representable range.
    pub fn expires_at(&self) -> Option<OffsetDateTime> {
        OffsetDateTime::from_unix_timestamp(self.exp).ok()
    }
}
