//! HTTP/JSON API layer for Shopbot.
//!
//! Axum-based API with the `{success, data|..., message}` envelope format
//! and CORS support. The per-client session identifier arrives in the
//! `X-Session-Id` header; issuing it is the frontend's concern.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod router;
