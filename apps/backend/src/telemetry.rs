//! Process-wide tracing setup for the `note-mark-backend` binary.
//!
//! Events are written as one JSON object per line. The enclosing `request`
//! span (see [`RequestTrace`](crate::middleware::RequestTrace)) is attached
//! to every event so its `trace_id`, `method` and `path` travel with it.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Used when `RUST_LOG` is unset or does not parse. Keeps the access log
/// and security events, silences actix's own per-connection chatter.
pub const DEFAULT_FILTER: &str = "info,actix_web=warn,actix_server=info";

pub fn init_tracing() {
    let filter = env_filter(std::env::var("RUST_LOG").ok().as_deref());

    let json = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(false)
        .with_target(false)
        .with_ansi(false);

    tracing_subscriber::registry().with(filter).with(json).init();
}

/// `directives` when they parse, otherwise [`DEFAULT_FILTER`].
fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_when_unset_or_blank() {
        for directives in [None, Some(""), Some("   ")] {
            let filter = env_filter(directives).to_string();
            assert!(filter.contains("actix_web=warn"), "{filter}");
        }
    }

    #[test]
    fn test_invalid_directives_fall_back() {
        let filter = env_filter(Some("note_mark_backend=loud")).to_string();
        assert!(filter.contains("actix_web=warn"), "{filter}");
    }

    #[test]
    fn test_explicit_directives_win() {
        let filter = env_filter(Some("debug,note_mark_backend=trace")).to_string();
        assert!(filter.contains("note_mark_backend=trace"), "{filter}");
        assert!(!filter.contains("actix_web=warn"), "{filter}");
    }
}
