use actix_web::web;

pub mod auth;
pub mod health;
pub mod users;

/// Register every route. Shared by `main.rs` and the integration tests so
/// both exercise the same paths.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Token issuance: /api/auth/token
    cfg.service(web::scope("/api/auth").configure(auth::configure_routes));

    // Protected user routes: /api/users/**
    cfg.service(web::scope("/api/users").configure(users::configure_routes));
}
