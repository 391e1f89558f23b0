use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use bytes::BytesMut;
use futures_util::future::LocalBoxFuture;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::Error as JsonError;
use tracing::debug;

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Upper bound on accepted JSON bodies.
pub const MAX_JSON_BODY_BYTES: usize = 16 * 1024;

/// JSON body extractor whose failures are problem-details 400s with a
/// sanitized message instead of actix's default plain-text errors.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(_req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let mut payload = payload.take();

        Box::pin(async move {
            let mut body = BytesMut::new();
            while let Some(chunk) = payload.next().await {
                let chunk = chunk.map_err(|e| {
                    debug!(error = %e, "failed to read request body chunk");
                    AppError::bad_request(ErrorCode::BadRequest, "Failed to read request body")
                })?;

                if body.len() + chunk.len() > MAX_JSON_BODY_BYTES {
                    return Err(AppError::bad_request(
                        ErrorCode::BadRequest,
                        "Request body too large",
                    ));
                }
                body.extend_from_slice(&chunk);
            }

            serde_json::from_slice::<T>(&body)
                .map(ValidatedJson)
                .map_err(|e| {
                    // The body may contain a password; log only the position.
                    debug!(
                        line = e.line(),
                        column = e.column(),
                        body_size = body.len(),
                        "JSON parsing failed"
                    );
                    AppError::bad_request(ErrorCode::BadRequest, classify_json_error(&e))
                })
        })
    }
}

/// Sanitized description of a JSON failure.
fn classify_json_error(error: &JsonError) -> String {
    match error.classify() {
        serde_json::error::Category::Syntax => {
            format!("Invalid JSON at line {}", error.line())
        }
        serde_json::error::Category::Eof => "Invalid JSON: unexpected end of input".to_string(),
        serde_json::error::Category::Data => {
            "Invalid JSON: wrong types for one or more fields".to_string()
        }
        serde_json::error::Category::Io => "Invalid JSON: I/O error while reading body".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Body {
        name: String,
    }

    async fn extract(
        body: impl Into<actix_web::web::Bytes>,
    ) -> Result<ValidatedJson<Body>, AppError> {
        let (req, mut payload) = TestRequest::post()
            .insert_header(("content-type", "application/json"))
            .set_payload(body)
            .to_http_parts();
        ValidatedJson::<Body>::from_request(&req, &mut payload).await
    }

    #[actix_web::test]
    async fn test_parses_valid_body() {
        let parsed = extract(r#"{"name":"alice"}"#).await.unwrap();
        assert_eq!(parsed.name, "alice");
        assert_eq!(parsed.into_inner().name, "alice");
    }

    #[actix_web::test]
    async fn test_syntax_error_is_bad_request() {
        let err = extract(r#"{"name": }"#).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::BadRequest);
        assert!(err.to_string().contains("Invalid JSON at line 1"));
    }

    #[actix_web::test]
    async fn test_empty_body_is_eof() {
        let err = extract("").await.unwrap_err();
        assert!(err.to_string().contains("unexpected end of input"));
    }

    #[actix_web::test]
    async fn test_wrong_types() {
        let err = extract(r#"{"name": 5}"#).await.unwrap_err();
        assert!(err.to_string().contains("wrong types"));
    }

    #[actix_web::test]
    async fn test_oversized_body_is_rejected() {
        let big = format!(r#"{{"name":"{}"}}"#, "x".repeat(MAX_JSON_BODY_BYTES));
        let err = extract(big).await.unwrap_err();
        assert!(err.to_string().contains("too large"));
    }
}
