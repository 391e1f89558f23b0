//! Process configuration loaded from environment variables.

use std::env;

use super::dev_users::{parse_dev_users, DevUser};
use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;

/// Configuration of the backend binary, validated once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub security: SecurityConfig,
    /// Accounts seeded into the in-memory credential store
    pub dev_users: Vec<DevUser>,
}

impl AppConfig {
    /// Load and validate all configuration from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns the value of a
    /// variable or `None` when it is unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("BACKEND_HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("BACKEND_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                AppError::config(format!("BACKEND_PORT must be a valid port number, got '{raw}'"))
            })?,
            None => DEFAULT_PORT,
        };

        let jwt_secret = lookup("BACKEND_JWT_SECRET")
            .ok_or_else(|| AppError::config("BACKEND_JWT_SECRET must be set"))?;
        if jwt_secret.trim().is_empty() {
            return Err(AppError::config("BACKEND_JWT_SECRET must not be empty"));
        }

        let dev_users = match lookup("BACKEND_DEV_USERS") {
            Some(raw) => parse_dev_users(&raw)?,
            None => Vec::new(),
        };

        Ok(Self {
            host,
            port,
            security: SecurityConfig::new(jwt_secret.into_bytes()),
            dev_users,
        })
    }
}
