use actix_web::http::header::{self, HeaderMap};

/// Bearer credential from the `Authorization` header (RFC 6750 §2.1).
///
/// Accepts exactly `Bearer <token>`: the scheme is matched exactly and the
/// token must be a single non-empty word. The error is a short
/// description for logs.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, &'static str> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or("missing Authorization header")?
        .to_str()
        .map_err(|_| "Authorization header is not visible ASCII")?;

    let parts: Vec<&str> = value.split_whitespace().collect();
    match parts.as_slice() {
        ["Bearer", token] if !token.is_empty() => Ok(token),
        ["Bearer"] => Err("empty bearer token"),
        _ => Err("malformed bearer credential"),
    }
}
