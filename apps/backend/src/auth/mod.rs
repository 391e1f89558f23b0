pub mod claims;
pub mod identity;
pub mod jwt;
pub mod token;

pub use claims::{ClaimSet, DecodeError};
pub use identity::{AuthenticatedUser, UserIdentity};
pub use jwt::{IssueError, TokenIssuer, ValidateError, ACCESS_TOKEN_TTL, ACCESS_TOKEN_TTL_SECS};
pub use token::{AccessToken, AccessTokenRequest};
