#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use note_mark_backend::auth::identity::UserIdentity;
use note_mark_backend::credentials::InMemoryCredentials;
use note_mark_backend::state::{AppState, SecurityConfig};
use note_mark_test_support::unique::unique_username;
use note_mark_test_support::TEST_JWT_SECRET;
use time::OffsetDateTime;

/// Build the production route tree around `$state` with the production
/// middleware stack.
macro_rules! init_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(note_mark_backend::StructuredLogger)
                .wrap(note_mark_backend::RequestTrace)
                .app_data($state)
                .configure(note_mark_backend::routes::configure),
        )
    };
}
pub(crate) use init_app;

pub struct TestContext {
    pub state: web::Data<AppState>,
    pub credentials: Arc<InMemoryCredentials>,
}

pub struct TestUser {
    pub username: String,
    pub password: String,
    pub identity: UserIdentity,
}

impl TestContext {
    pub fn new() -> Self {
        note_mark_test_support::test_logging::init();

        let credentials = Arc::new(InMemoryCredentials::new());
        let state = AppState::with_memory_credentials(
            SecurityConfig::new(TEST_JWT_SECRET),
            Arc::clone(&credentials),
        );

        Self {
            state: web::Data::new(state),
            credentials,
        }
    }

    pub fn register_user(&self) -> TestUser {
        let username = unique_username("user");
        let password = "correct horse battery staple".to_string();
        let identity = self.credentials.register(&username, &password);

        TestUser {
            username,
            password,
            identity,
        }
    }

    /// Token for `identity` issued at `now` with the app's own key.
    pub fn token_at(&self, identity: UserIdentity, now: OffsetDateTime) -> String {
        self.state
            .tokens
            .issue(identity, now)
            .expect("issuing with the test key should succeed")
            .access_token
    }

    pub fn fresh_token(&self, identity: UserIdentity) -> String {
        self.token_at(identity, OffsetDateTime::now_utc())
    }
}
