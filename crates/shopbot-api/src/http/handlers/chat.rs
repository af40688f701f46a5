//! Chatbot HTTP handler.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use shopbot_types::chat::BotReply;

use crate::http::error::AppError;
use crate::http::extractors::session::SessionId;
use crate::http::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Default)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

/// POST /chat - Run the message through the rule engine.
///
/// The cart line count feeds the "cart" branch. Dispatch itself never fails;
/// only the cart lookup can surface a storage error here.
pub async fn chat(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Json(body): Json<ChatRequest>,
) -> Result<ApiResponse<BotReply>, AppError> {
    let cart_count = state.cart_service.get(&session_id).await?.count;
    let reply = state.chatbot_service.respond(&body.message, cart_count).await;
    Ok(ApiResponse::success(reply))
}
