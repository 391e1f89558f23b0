//! OAuth 2.0 wire shapes for the token endpoint (RFC 6749, RFC 6750).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::errors::ErrorCode;

/// The only grant this service supports ("Resource Owner Password Credentials").
pub const PASSWORD_GRANT: &str = "password";

/// Successful access token response (RFC 6749 §5.1).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    /// Always `"Bearer"`
    pub token_type: String,
    /// Lifetime of the token in seconds
    pub expires_in: u64,
}

impl AccessToken {
    pub fn bearer(access_token: String, expires_in: u64) -> Self {
        Self {
            access_token,
            token_type: super::jwt::TOKEN_TYPE.to_string(),
            expires_in,
        }
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Access token request (RFC 6749 §4.3.2).
#[derive(Deserialize)]
pub struct AccessTokenRequest {
    #[serde(default)]
    pub grant_type: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl AccessTokenRequest {
    /// Check required fields and the grant type.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.grant_type.trim().is_empty() {
            return Err(AppError::bad_request(
                ErrorCode::InvalidRequest,
                "grant_type is required",
            ));
        }

        if self.grant_type != PASSWORD_GRANT {
            return Err(AppError::bad_request(
                ErrorCode::UnsupportedGrantType,
                format!("grant_type must be '{PASSWORD_GRANT}'"),
            ));
        }

        if self.username.trim().is_empty() {
            return Err(AppError::bad_request(
                ErrorCode::InvalidRequest,
                "username cannot be empty",
            ));
        }

        if self.password.is_empty() {
            return Err(AppError::bad_request(
                ErrorCode::InvalidRequest,
                "password cannot be empty",
            ));
        }

        Ok(())
    }
}

impl fmt::Debug for AccessTokenRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessTokenRequest")
            .field("grant_type", &self.grant_type)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn request(grant_type: &str, username: &str, password: &str) -> AccessTokenRequest {
        AccessTokenRequest {
            grant_type: grant_type.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    fn code_of(result: Result<(), AppError>) -> ErrorCode {
        result.expect_err("request should be rejected").code()
    }

    #[test]
    fn test_access_token_wire_shape() {
        let token = AccessToken::bearer("abc.def.ghi".to_string(), 259_200);
        assert_eq!(
            serde_json::to_value(&token).unwrap(),
            json!({
                "access_token": "abc.def.ghi",
                "token_type": "Bearer",
                "expires_in": 259200
            })
        );
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let token = AccessToken::bearer("abc.def.ghi".to_string(), 1);
        assert!(!format!("{token:?}").contains("abc.def.ghi"));

        let req = request("password", "alice", "hunter2");
        let debug = format!("{req:?}");
        assert!(debug.contains("alice"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_valid_password_grant() {
        assert!(request("password", "alice", "hunter2").validate().is_ok());
    }

    #[test]
    fn test_unsupported_grant_type() {
        assert_eq!(
            code_of(request("client_credentials", "alice", "hunter2").validate()),
            ErrorCode::UnsupportedGrantType
        );
        // Grant type is case-sensitive
        assert_eq!(
            code_of(request("Password", "alice", "hunter2").validate()),
            ErrorCode::UnsupportedGrantType
        );
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            code_of(request("", "alice", "hunter2").validate()),
            ErrorCode::InvalidRequest
        );
        assert_eq!(
            code_of(request("password", "   ", "hunter2").validate()),
            ErrorCode::InvalidRequest
        );
        assert_eq!(
            code_of(request("password", "alice", "").validate()),
            ErrorCode::InvalidRequest
        );
    }

    #[test]
    fn test_missing_json_fields_default_to_empty() {
        let req: AccessTokenRequest = serde_json::from_str(r#"{"username":"alice"}"#).unwrap();
        assert_eq!(req.grant_type, "");
        assert_eq!(code_of(req.validate()), ErrorCode::InvalidRequest);
    }
}
