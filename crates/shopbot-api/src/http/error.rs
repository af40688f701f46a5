//! Application error type mapping to HTTP status codes and the envelope format.
//!
//! Storage detail is logged, never sent to the client: a 500 carries only a
//! generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use shopbot_types::error::{CartError, CatalogError, ConversationError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Catalog-related errors.
    Catalog(CatalogError),
    /// Cart-related errors.
    Cart(CartError),
    /// Conversation-related errors.
    Conversation(ConversationError),
    /// Validation error on a request body or header.
    Validation(String),
    /// Generic internal error.
    Internal(String),
}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        AppError::Catalog(e)
    }
}

impl From<CartError> for AppError {
    fn from(e: CartError) -> Self {
        AppError::Cart(e)
    }
}

impl From<ConversationError> for AppError {
    fn from(e: ConversationError) -> Self {
        AppError::Conversation(e)
    }
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Catalog(CatalogError::NotFound) => {
                (StatusCode::NOT_FOUND, "Product not found".to_string())
            }
            AppError::Catalog(CatalogError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            AppError::Cart(CartError::ProductNotFound) => {
                (StatusCode::NOT_FOUND, "Product not found".to_string())
            }
            AppError::Conversation(ConversationError::NotFound) => {
                (StatusCode::NOT_FOUND, "Conversation not found".to_string())
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Catalog(CatalogError::Storage(detail))
            | AppError::Cart(CartError::Storage(detail))
            | AppError::Conversation(ConversationError::Storage(detail))
            | AppError::Internal(detail) => {
                error!(detail = %detail, "Internal error while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        let body = if status == StatusCode::INTERNAL_SERVER_ERROR {
            json!({
                "success": false,
                "error": "Server error",
                "message": message,
            })
        } else {
            json!({
                "success": false,
                "message": message,
            })
        };

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
