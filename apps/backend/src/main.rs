use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use note_mark_backend::config::AppConfig;
use note_mark_backend::credentials::InMemoryCredentials;
use note_mark_backend::middleware::{RequestTrace, StructuredLogger};
use note_mark_backend::routes;
use note_mark_backend::state::AppState;
use note_mark_backend::telemetry;
use tracing::{error, info, warn};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker env_file, or `set -a; . ./.env; set +a` locally).
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let credentials = Arc::new(InMemoryCredentials::new());
    for user in &config.dev_users {
        match user.identity {
            Some(identity) => {
                credentials.register_with_identity(&user.username, &user.password, identity)
            }
            None => {
                credentials.register(&user.username, &user.password);
            }
        }
    }
    if credentials.is_empty() {
        warn!("no accounts configured; set BACKEND_DEV_USERS to allow token requests");
    }

    let app_state = AppState::with_memory_credentials(config.security.clone(), credentials);
    let data = web::Data::new(app_state);

    info!(host = %config.host, port = config.port, "starting Note Mark backend");

    HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
