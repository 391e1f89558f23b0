//! Development accounts seeded from `BACKEND_DEV_USERS`.
//!
//! Format: comma-separated `username:password[:uuid]` entries. The password
//! may not contain `:` or `,`. Without a uuid a random identity is minted.

use crate::auth::identity::UserIdentity;
use crate::error::AppError;

#[derive(Clone, PartialEq, Eq)]
pub struct DevUser {
    pub username: String,
    pub password: String,
    pub identity: Option<UserIdentity>,
}

impl std::fmt::Debug for DevUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DevUser")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("identity", &self.identity)
            .finish()
    }
}

pub fn parse_dev_users(raw: &str) -> Result<Vec<DevUser>, AppError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .enumerate()
        .map(|(index, entry)| parse_entry(index, entry))
        .collect()
}

fn parse_entry(index: usize, entry: &str) -> Result<DevUser, AppError> {
    let mut parts = entry.splitn(3, ':');
    let username = parts.next().unwrap_or_default().trim();
    let password = parts.next().unwrap_or_default();

    if username.is_empty() || password.is_empty() {
        return Err(AppError::config(format!(
            "BACKEND_DEV_USERS entry {index} must look like username:password[:uuid]"
        )));
    }

    let identity = parts
        .next()
        .map(|raw| {
            raw.trim().parse::<UserIdentity>().map_err(|e| {
                AppError::config(format!(
                    "BACKEND_DEV_USERS entry {index} has an invalid uuid: {e}"
                ))
            })
        })
        .transpose()?;

    Ok(DevUser {
        username: username.to_string(),
        password: password.to_string(),
        identity,
    })
}
