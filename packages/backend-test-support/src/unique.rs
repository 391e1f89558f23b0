//! Unique test data helpers backed by ULIDs.

use ulid::Ulid;

/// Generate a unique string in the format `{prefix}-{ulid}`.
///
/// ```
/// use note_mark_test_support::unique::unique_str;
///
/// let a = unique_str("user");
/// let b = unique_str("user");
/// assert_ne!(a, b);
/// assert!(a.starts_with("user-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a unique username that fits the 25 character username column
/// (`{prefix}` truncated to 4 chars, `-`, then the lowercase ULID suffix).
pub fn unique_username(prefix: &str) -> String {
    let prefix: String = prefix.chars().take(4).collect();
    let ulid = Ulid::new().to_string().to_lowercase();
    format!("{}-{}", prefix, &ulid[ulid.len() - 20..])
}
