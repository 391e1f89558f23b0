use actix_web::{web, HttpResponse};

use crate::auth::identity::AuthenticatedUser;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;

/// Identity of the caller, as recovered from their bearer token.
async fn me(current_user: CurrentUser) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(AuthenticatedUser::from(current_user.identity())))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/me", web::get().to(me));
}
