use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};

const JWT_MASK: &str = "[REDACTED_JWT]";
const TOKEN_MASK: &str = "[REDACTED_TOKEN]";

// The patterns below are vetted literals.

/// Compact JWS: base64url JSON header (always starts `eyJ`), payload, signature.
static JWT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"\beyJ[A-Za-z0-9_-]*\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]*").unwrap()
});

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"\b([A-Za-z0-9._%+-]+)(@[A-Za-z0-9.-]+\.[A-Za-z]{1,})\b").unwrap()
});

/// Opaque secrets: 16+ base64/base64url/hex characters in a row.
static OPAQUE_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"\b[A-Za-z0-9+/_-]{16,}={0,2}").unwrap()
});

/// Masks credentials and personal data in free text before it is logged.
///
/// Bearer JWTs are replaced whole, emails keep their first character and
/// domain, and remaining long opaque runs are replaced.
pub fn redact(input: &str) -> String {
    let without_jwts = JWT_REGEX.replace_all(input, JWT_MASK);

    let without_emails = EMAIL_REGEX.replace_all(&without_jwts, |caps: &Captures| {
        let local = &caps[1];
        let domain = &caps[2];
        let first: String = local.chars().take(1).collect();
        format!("{first}***{domain}")
    });

    OPAQUE_TOKEN_REGEX
        .replace_all(&without_emails, TOKEN_MASK)
        .into_owned()
}

/// Applies [`redact`] when formatted, for log fields such as usernames
/// that may hold an email address or a pasted credential.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_usernames_pass_through() {
        assert_eq!(redact("alice"), "alice");
        assert_eq!(redact("bob_the_builder"), "bob_the_builder");
        assert_eq!(redact(""), "");
    }

    #[test]
    fn test_email_usernames_are_masked() {
        assert_eq!(redact("alice@example.com"), "a***@example.com");
        assert_eq!(
            redact("login by bob@notes.example.org failed"),
            "login by b***@notes.example.org failed"
        );
    }

    #[test]
    fn test_jwt_is_masked_whole() {
        let jwt = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.\
                   eyJzdWIiOiIzZmE4NWY2NC01NzE3LTQ1NjItYjNmYy0yYzk2M2Y2NmFmYTYiLCJleHAiOjF9.\
                   c2lnbmF0dXJlLWJ5dGVzLWhlcmU";
        assert_eq!(redact(jwt), JWT_MASK);
        assert_eq!(
            redact(&format!("Bearer {jwt}")),
            format!("Bearer {JWT_MASK}")
        );
    }

    #[test]
    fn test_long_opaque_runs_are_masked() {
        assert_eq!(redact("a1b2c3d4e5f678901234567890123456"), TOKEN_MASK);
        assert_eq!(redact("key=dGhpcyBpcyBhIHNlY3JldA=="), format!("key={TOKEN_MASK}"));
        // Short runs survive
        assert_eq!(redact("pw123"), "pw123");
    }

    #[test]
    fn test_redacted_wrapper_formats() {
        let redacted = Redacted("carol@example.net");
        assert_eq!(format!("{redacted}"), "c***@example.net");
        assert_eq!(format!("{redacted:?}"), "c***@example.net");
    }
}
