//! Error codes for the Note Mark backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication
    /// Authentication required (missing, expired, or invalid credentials)
    Unauthorized,

    // Request Validation
    /// Body could not be read or parsed
    BadRequest,
    /// Required request field missing or blank
    InvalidRequest,
    /// `grant_type` other than `password`
    UnsupportedGrantType,

    // System Errors
    /// Internal server error
    Internal,
    /// Token signing failed
    SigningFailure,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",

            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::UnsupportedGrantType => "UNSUPPORTED_GRANT_TYPE",

            Self::Internal => "INTERNAL",
            Self::SigningFailure => "SIGNING_FAILURE",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    const ALL: [ErrorCode; 7] = [
        ErrorCode::Unauthorized,
        ErrorCode::BadRequest,
        ErrorCode::InvalidRequest,
        ErrorCode::UnsupportedGrantType,
        ErrorCode::Internal,
        ErrorCode::SigningFailure,
        ErrorCode::ConfigError,
    ];

    #[test]
    fn test_error_code_strings() {
        assert_eq!(ErrorCode::Unauthorized.as_str(), "UNAUTHORIZED");
        assert_eq!(ErrorCode::BadRequest.as_str(), "BAD_REQUEST");
        assert_eq!(ErrorCode::InvalidRequest.as_str(), "INVALID_REQUEST");
        assert_eq!(
            ErrorCode::UnsupportedGrantType.as_str(),
            "UNSUPPORTED_GRANT_TYPE"
        );
        assert_eq!(ErrorCode::Internal.as_str(), "INTERNAL");
        assert_eq!(ErrorCode::SigningFailure.as_str(), "SIGNING_FAILURE");
        assert_eq!(ErrorCode::ConfigError.as_str(), "CONFIG_ERROR");
    }

    #[test]
    fn test_error_codes_are_unique_and_screaming_snake() {
        let mut seen = HashSet::new();
        for code in ALL {
            let s = code.as_str();
            assert!(seen.insert(s), "duplicate error code {s}");
            assert!(
                s.chars().all(|c| c.is_ascii_uppercase() || c == '_'),
                "{s} is not SCREAMING_SNAKE_CASE"
            );
        }
    }

    #[test]
    fn test_display_matches_as_str() {
        for code in ALL {
            assert_eq!(code.to_string(), code.as_str());
        }
    }
}
