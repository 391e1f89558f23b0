use actix_web::http::header::{CacheControl, CacheDirective, PRAGMA};
use actix_web::{web, HttpResponse};
use time::OffsetDateTime;

use crate::auth::token::AccessTokenRequest;
use crate::error::AppError;
use crate::extractors::validated_json::ValidatedJson;
use crate::logging::security;
use crate::state::app_state::AppState;

/// Resource-owner password grant (RFC 6749 §4.3).
///
/// Verifies the credentials through the configured verifier and returns a
/// bearer token. Unknown users and wrong passwords are the same 401.
async fn token(
    req: ValidatedJson<AccessTokenRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let req = req.into_inner();
    req.validate()?;

    let identity = app_state
        .credentials
        .verify(&req.username, &req.password)
        .await?
        .ok_or_else(|| {
            security::login_failed("invalid_credentials", &req.username);
            AppError::unauthorized()
        })?;

    let token = app_state.tokens.issue(identity, OffsetDateTime::now_utc())?;
    security::token_issued(identity);

    Ok(HttpResponse::Ok()
        .insert_header(CacheControl(vec![CacheDirective::NoStore]))
        .insert_header((PRAGMA, "no-cache"))
        .json(token))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/token").route(web::post().to(token)));
}
