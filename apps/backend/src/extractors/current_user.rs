use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};
use time::OffsetDateTime;

use super::auth_token::bearer_token;
use crate::auth::identity::UserIdentity;
use crate::error::AppError;
use crate::logging::security;
use crate::state::app_state::AppState;

/// The authenticated caller.
///
/// Taking `CurrentUser` as a handler argument makes the route protected:
/// the bearer token is validated before the handler body runs, and every
/// failure is the same 401. The recovered identity is passed to the
/// handler directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub UserIdentity);

/// How bearer authentication ended for a request, left in the request
/// extensions for the access log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    Authenticated(UserIdentity),
    /// Stable reason label, as in [`crate::auth::jwt::ValidateError::reason`].
    Rejected(&'static str),
}

/// Reason recorded when no usable `Authorization: Bearer` header was sent.
pub const MISSING_BEARER: &str = "missing_bearer";

impl CurrentUser {
    pub fn identity(&self) -> UserIdentity {
        self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req, OffsetDateTime::now_utc()))
    }
}

fn authenticate(req: &HttpRequest, now: OffsetDateTime) -> Result<CurrentUser, AppError> {
    let token = bearer_token(req.headers()).map_err(|detail| {
        security::bearer_missing(detail);
        req.extensions_mut()
            .insert(AuthOutcome::Rejected(MISSING_BEARER));
        AppError::unauthorized()
    })?;

    let app_state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::internal("AppState not available"))?;

    let outcome = app_state.tokens.validate(token, now);
    req.extensions_mut().insert(match &outcome {
        Ok(identity) => AuthOutcome::Authenticated(*identity),
        Err(err) => AuthOutcome::Rejected(err.reason()),
    });

    outcome.map(CurrentUser).map_err(|err| {
        security::token_rejected(&err);
        AppError::from(err)
    })
}
