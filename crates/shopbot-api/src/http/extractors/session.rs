//! Session identifier extractor.
//!
//! The frontend issues a stable per-client session id (cookie plumbing lives
//! there) and forwards it on every request in the `X-Session-Id` header.
//! Session-scoped endpoints reject requests without one.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::http::error::AppError;

/// The caller's session identifier, taken from `X-Session-Id`.
#[derive(Debug, Clone)]
pub struct SessionId(pub String);

impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get("x-session-id")
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| SessionId(value.to_string()))
            .ok_or_else(|| AppError::Validation("Missing X-Session-Id header".to_string()))
    }
}
