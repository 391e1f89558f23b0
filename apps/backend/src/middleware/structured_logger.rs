//! Access log: one `request_completed` event per request, levelled by
//! status class.
//!
//! When a [`CurrentUser`](crate::extractors::CurrentUser) extractor ran, the
//! event also names the caller (`user_id`) or why the bearer token was
//! refused (`auth_reason`).

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, field, info, warn};

use super::request_trace::TraceId;
use crate::auth::identity::UserIdentity;
use crate::extractors::current_user::AuthOutcome;
use crate::trace_ctx::UNKNOWN_TRACE_ID;

pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let started = Instant::now();
        let mut entry = AccessLogEntry {
            method: req.method().to_string(),
            path: req.path().to_string(),
            trace_id: req
                .extensions()
                .get::<TraceId>()
                .map(|t| t.0.clone())
                .unwrap_or_else(|| UNKNOWN_TRACE_ID.to_string()),
            status: StatusCode::OK,
            auth: None,
        };

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            match &result {
                Ok(res) => {
                    entry.status = res.status();
                    entry.auth = res.request().extensions().get::<AuthOutcome>().copied();
                }
                Err(err) => entry.status = err.as_response_error().status_code(),
            }
            entry.emit(started.elapsed().as_micros() as u64);

            result
        })
    }
}

struct AccessLogEntry {
    method: String,
    path: String,
    trace_id: String,
    status: StatusCode,
    auth: Option<AuthOutcome>,
}

impl AccessLogEntry {
    fn user_id(&self) -> Option<UserIdentity> {
        match self.auth {
            Some(AuthOutcome::Authenticated(identity)) => Some(identity),
            _ => None,
        }
    }

    fn auth_reason(&self) -> Option<&'static str> {
        match self.auth {
            Some(AuthOutcome::Rejected(reason)) => Some(reason),
            _ => None,
        }
    }

    fn emit(&self, duration_us: u64) {
        let method = &self.method;
        let path = &self.path;
        let status_code = self.status.as_u16();
        let trace_id = &self.trace_id;
        let user_id = self.user_id().map(field::display);
        let auth_reason = self.auth_reason();

        macro_rules! completed {
            ($level:ident) => {
                $level!(
                    http.method = %method,
                    url.path = %path,
                    http.status_code = status_code,
                    duration_us,
                    %trace_id,
                    user_id,
                    auth_reason,
                    "request_completed"
                )
            };
        }

        if self.status.is_server_error() {
            completed!(error);
        } else if self.status.is_client_error() {
            completed!(warn);
        } else {
            completed!(info);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{test, web, App};
    use note_mark_test_support::log_capture::{self, CapturedEvent, EventCollector};
    use tracing::Level;

    use super::*;
    use crate::credentials::InMemoryCredentials;
    use crate::middleware::RequestTrace;
    use crate::state::{AppState, SecurityConfig};

    fn state() -> web::Data<AppState> {
        web::Data::new(AppState::with_memory_credentials(
            SecurityConfig::new("access-log-test-secret"),
            Arc::new(InMemoryCredentials::new()),
        ))
    }

    fn completed(events: &EventCollector) -> CapturedEvent {
        events
            .find("message", "request_completed")
            .expect("request_completed should be logged")
    }

    #[actix_web::test]
    async fn test_authenticated_request_logs_user_id() {
        let state = state();
        let identity = UserIdentity::generate();
        let token = state
            .tokens
            .issue(identity, time::OffsetDateTime::now_utc())
            .unwrap()
            .access_token;
        let app = test::init_service(
            App::new()
                .wrap(StructuredLogger)
                .wrap(RequestTrace)
                .app_data(state)
                .configure(crate::routes::configure),
        )
        .await;

        let (events, _guard) = log_capture::capture();
        let req = test::TestRequest::get()
            .uri("/api/users/me")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let event = completed(&events);
        assert_eq!(event.level, Level::INFO);
        assert_eq!(event.field("user_id"), Some(identity.to_string().as_str()));
        assert_eq!(event.field("auth_reason"), None);
        assert_eq!(event.field("http.status_code"), Some("200"));
        assert_eq!(event.field("url.path"), Some("/api/users/me"));
    }

    #[actix_web::test]
    async fn test_rejected_request_logs_reason() {
        let app = test::init_service(
            App::new()
                .wrap(StructuredLogger)
                .wrap(RequestTrace)
                .app_data(state())
                .configure(crate::routes::configure),
        )
        .await;

        let cases = [
            (None, "missing_bearer"),
            (Some("Bearer not.a.jwt"), "invalid_signature"),
        ];

        for (authorization, reason) in cases {
            let (events, _guard) = log_capture::capture();
            let mut req = test::TestRequest::get().uri("/api/users/me");
            if let Some(value) = authorization {
                req = req.insert_header(("Authorization", value));
            }
            let resp = test::call_service(&app, req.to_request()).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

            let event = completed(&events);
            assert_eq!(event.level, Level::WARN);
            assert_eq!(event.field("auth_reason"), Some(reason));
            assert_eq!(event.field("user_id"), None);
        }
    }

    #[actix_web::test]
    async fn test_public_route_logs_no_auth_fields() {
        let app = test::init_service(
            App::new()
                .wrap(StructuredLogger)
                .wrap(RequestTrace)
                .app_data(state())
                .configure(crate::routes::configure),
        )
        .await;

        let (events, _guard) = log_capture::capture();
        let req = test::TestRequest::get().uri("/health").to_request();
        test::call_service(&app, req).await;

        let event = completed(&events);
        assert_eq!(event.level, Level::INFO);
        assert_eq!(event.field("user_id"), None);
        assert_eq!(event.field("auth_reason"), None);
        assert!(event.field("trace_id").is_some_and(|t| t != "unknown"));
    }
}
