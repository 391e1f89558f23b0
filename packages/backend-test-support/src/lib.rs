//! Test support utilities for the Note Mark backend.
//!
//! Shared between the backend's unit tests and its integration tests:
//! one-time logging setup, thread-local event capture, RFC 7807
//! problem-details assertions, and helpers for generating unique test data.

pub mod log_capture;
pub mod problem_details;
pub mod test_logging;
pub mod unique;

/// HMAC secret used by tests that need a well-known signing key.
pub const TEST_JWT_SECRET: &str = "test_secret_key_for_testing_purposes_only";
