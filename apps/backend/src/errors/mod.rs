//! Error handling for the Note Mark backend.

pub mod error_code;

pub use error_code::ErrorCode;
