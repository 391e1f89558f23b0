//! Task-local trace context for web requests.
//!
//! `RequestTrace` establishes the scope; anything running inside the
//! request future (extractors, handlers, error rendering) can read the
//! current trace id without it being threaded through every call.

use std::future::Future;

use tokio::task_local;

/// Returned when no request scope is active.
pub const UNKNOWN_TRACE_ID: &str = "unknown";

task_local! {
    static TRACE_ID: String;
}

/// Trace id of the current request, or [`UNKNOWN_TRACE_ID`] outside one.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(Clone::clone)
        .unwrap_or_else(|_| UNKNOWN_TRACE_ID.to_string())
}

/// Run `future` with `trace_id` as the current trace id.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}
