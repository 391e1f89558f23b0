//! Security-relevant log events.
//!
//! Each event carries a stable `event` field so log pipelines can alert on
//! it, plus the current request's trace id.

use tracing::{error, info, warn};

use crate::auth::identity::UserIdentity;
use crate::auth::jwt::ValidateError;
use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// A token request was refused.
pub fn login_failed(reason: &str, username: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_LOGIN_FAILED",
        %trace_id,
        username = %Redacted(username),
        reason,
        "Authentication failure"
    );
}

/// An access token was issued.
pub fn token_issued(identity: UserIdentity) {
    let trace_id = trace_ctx::trace_id();

    info!(
        event = "SECURITY_TOKEN_ISSUED",
        %trace_id,
        user_id = %identity,
        "Access token issued"
    );
}

/// An inbound bearer token was rejected.
///
/// Expiry is routine; a bad signature may be an attack; a malformed subject
/// on a verified token means this service minted something it cannot read.
pub fn token_rejected(err: &ValidateError) {
    let trace_id = trace_ctx::trace_id();
    let reason = err.reason();

    match err {
        ValidateError::Expired => {
            info!(event = "SECURITY_TOKEN_REJECTED", %trace_id, reason, "Access token rejected");
        }
        ValidateError::InvalidSignature => {
            warn!(event = "SECURITY_TOKEN_REJECTED", %trace_id, reason, "Access token rejected");
        }
        ValidateError::MalformedSubject(source) => {
            error!(
                event = "SECURITY_TOKEN_REJECTED",
                %trace_id,
                reason,
                error = %source,
                "Verified access token carries an unreadable subject"
            );
        }
    }
}

/// The `Authorization` header was missing or not a well-formed bearer credential.
pub fn bearer_missing(detail: &str) {
    let trace_id = trace_ctx::trace_id();

    info!(
        event = "SECURITY_BEARER_MISSING",
        %trace_id,
        detail,
        "Request without usable bearer token"
    );
}

#[cfg(test)]
mod tests {
    use note_mark_test_support::log_capture;
    use tracing::Level;

    use super::*;
    use crate::auth::claims::DecodeError;

    fn malformed_subject() -> ValidateError {
        ValidateError::MalformedSubject(DecodeError::MalformedSubject {
            subject: "not-a-uuid".to_string(),
            source: "not-a-uuid".parse::<uuid::Uuid>().unwrap_err(),
        })
    }

    #[test]
    fn test_token_rejected_level_follows_reason() {
        let cases = [
            (ValidateError::Expired, Level::INFO, "token_expired"),
            (ValidateError::InvalidSignature, Level::WARN, "invalid_signature"),
            (malformed_subject(), Level::ERROR, "malformed_subject"),
        ];

        for (err, level, reason) in cases {
            let (events, _guard) = log_capture::capture();
            token_rejected(&err);

            let event = events
                .find("event", "SECURITY_TOKEN_REJECTED")
                .expect("rejection should be logged");
            assert_eq!(event.level, level, "level for {reason}");
            assert_eq!(event.field("reason"), Some(reason));
            assert_eq!(event.field("trace_id"), Some("unknown"));
        }
    }

    #[test]
    fn test_malformed_subject_logs_the_decode_error() {
        let (events, _guard) = log_capture::capture();
        token_rejected(&malformed_subject());

        let event = events.find("event", "SECURITY_TOKEN_REJECTED").unwrap();
        assert!(event.field("error").unwrap().contains("not-a-uuid"));
    }

    #[test]
    fn test_login_failed_redacts_username() {
        let (events, _guard) = log_capture::capture();
        login_failed("invalid_credentials", "alice@example.com");

        let event = events.find("event", "SECURITY_LOGIN_FAILED").unwrap();
        assert_eq!(event.level, Level::WARN);
        assert_eq!(event.field("username"), Some("a***@example.com"));
        assert_eq!(event.field("reason"), Some("invalid_credentials"));
    }

    #[test]
    fn test_token_issued_names_the_user() {
        let identity = UserIdentity::generate();
        let (events, _guard) = log_capture::capture();
        token_issued(identity);

        let event = events.find("event", "SECURITY_TOKEN_ISSUED").unwrap();
        assert_eq!(event.level, Level::INFO);
        assert_eq!(event.field("user_id"), Some(identity.to_string().as_str()));
    }
}
