//! Envelope response format for all API responses.
//!
//! Every response is a JSON object with at minimum a boolean `success`.
//! Success payloads ride under `data` or under operation-specific keys
//! (`conversationId`, `cartCount`, ...); failures carry `message`:
//! ```json
//! { "success": true, "data": { ... }, "message": "Product added successfully" }
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{Map, Value};

/// Envelope wrapping all successful API responses.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the operation succeeded.
    pub success: bool,

    /// The main response payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Human-readable confirmation or error text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Operation-specific top-level keys (`conversationId`, `cartCount`, ...).
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a success response with a `data` payload.
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            fields: Map::new(),
        }
    }

    /// Attach a confirmation message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attach an operation-specific top-level key.
    pub fn with_field(mut self, key: &str, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.fields.insert(key.to_string(), value);
        self
    }
}

impl ApiResponse<()> {
    /// Create a success response without a `data` payload.
    pub fn ok() -> Self {
        Self {
            success: true,
            data: None,
            message: None,
            fields: Map::new(),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let body = serde_json::to_string(&self).unwrap_or_else(|_| {
            r#"{"success":false,"message":"Failed to serialize response"}"#.to_string()
        });

        (
            StatusCode::OK,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_with_data() {
        let resp = ApiResponse::success(vec![1, 2, 3]);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], serde_json::json!([1, 2, 3]));
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_ok_with_fields_and_message() {
        let resp = ApiResponse::ok()
            .with_message("Product added successfully")
            .with_field("productId", 42);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["productId"], 42);
        assert_eq!(json["message"], "Product added successfully");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_null_field_is_preserved() {
        // conversations/messages reports `conversationId: null` for a
        // session that has no active conversation.
        let resp = ApiResponse::success(Vec::<i32>::new())
            .with_field("conversationId", Option::<String>::None);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["conversationId"], Value::Null);
    }

    #[test]
    fn test_into_response_is_200() {
        let resp = ApiResponse::success("hello").into_response();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
