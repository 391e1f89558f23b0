#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod credentials;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod telemetry;
pub mod trace_ctx;

// Re-exports for public API
pub use auth::identity::{AuthenticatedUser, UserIdentity};
pub use auth::jwt::{IssueError, TokenIssuer, ValidateError};
pub use config::app::AppConfig;
pub use credentials::{CredentialVerifier, InMemoryCredentials};
pub use error::AppError;
pub use extractors::current_user::CurrentUser;
pub use middleware::request_trace::RequestTrace;
pub use middleware::structured_logger::StructuredLogger;
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    note_mark_test_support::test_logging::init();
}
