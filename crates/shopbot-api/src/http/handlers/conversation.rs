//! Buyer-seller conversation HTTP handlers.
//!
//! Endpoints:
//! - POST /conversations/start    - Rotate the session onto a fresh conversation
//! - POST /conversations/send     - Buyer message to the session's conversation
//! - GET  /conversations/messages - Messages for the session's active conversation
//! - GET  /conversations/all      - Seller inbox: active conversations with messages
//! - GET  /conversations/by-id    - Messages for an explicit conversation id
//! - POST /conversations/reply    - Seller message to an explicit conversation id
//! - POST /conversations/cleanup  - Manual expiry trigger

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use shopbot_types::conversation::{ConversationSummary, Message, SenderType};

use crate::http::error::AppError;
use crate::http::extractors::session::SessionId;
use crate::http::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub message: String,
    #[serde(rename = "senderType")]
    pub sender_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReplyRequest {
    #[serde(rename = "conversationId")]
    pub conversation_id: Uuid,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ByIdQuery {
    pub id: Uuid,
}

#[derive(Debug, Deserialize, Default)]
pub struct CleanupRequest {
    pub days: Option<i64>,
}

/// POST /conversations/start - Always mints a fresh conversation; any
/// previously active one for the session is closed first.
pub async fn start_conversation(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> Result<ApiResponse<()>, AppError> {
    let conversation = state.conversation_service.start_or_get(&session_id).await?;

    Ok(ApiResponse::ok()
        .with_field("conversationId", conversation.id)
        .with_field("sessionId", session_id))
}

/// POST /conversations/send - Append a buyer (by default) message to the
/// session's active conversation, starting one if none exists.
pub async fn send_message(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Json(body): Json<SendMessageRequest>,
) -> Result<ApiResponse<()>, AppError> {
    let sender = parse_sender(body.sender_type.as_deref())?;

    let conversation = match state.conversation_service.find_by_session(&session_id).await? {
        Some(conversation) => conversation,
        None => state.conversation_service.start_or_get(&session_id).await?,
    };

    state
        .conversation_service
        .send(&conversation.id, sender, &body.message)
        .await?;

    Ok(ApiResponse::ok()
        .with_field("conversationId", conversation.id)
        .with_field("sessionId", session_id))
}

/// GET /conversations/messages - Messages for the session's active
/// conversation; an empty list (and a null id) when there is none.
pub async fn session_messages(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> Result<ApiResponse<Vec<Message>>, AppError> {
    match state.conversation_service.find_by_session(&session_id).await? {
        Some(conversation) => {
            let messages = state
                .conversation_service
                .messages(&conversation.id, None)
                .await?;
            Ok(ApiResponse::success(messages).with_field("conversationId", conversation.id))
        }
        None => Ok(ApiResponse::success(Vec::new())
            .with_field("conversationId", Option::<Uuid>::None)),
    }
}

/// GET /conversations/all - Active conversations holding at least one
/// message, most recently updated first.
pub async fn all_conversations(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<ConversationSummary>>, AppError> {
    let summaries = state.conversation_service.list_active().await?;
    Ok(ApiResponse::success(summaries))
}

/// GET /conversations/by-id?id= - Messages for an explicit conversation.
pub async fn messages_by_id(
    State(state): State<AppState>,
    Query(query): Query<ByIdQuery>,
) -> Result<ApiResponse<Vec<Message>>, AppError> {
    let messages = state.conversation_service.messages(&query.id, None).await?;
    Ok(ApiResponse::success(messages))
}

/// POST /conversations/reply - Seller message to an explicit conversation.
/// 404 when the conversation does not exist.
pub async fn reply(
    State(state): State<AppState>,
    Json(body): Json<ReplyRequest>,
) -> Result<ApiResponse<()>, AppError> {
    state
        .conversation_service
        .send(&body.conversation_id, SenderType::Seller, &body.message)
        .await?;

    Ok(ApiResponse::ok())
}

/// POST /conversations/cleanup - Manual expiry trigger; `days` defaults to 1.
pub async fn cleanup(
    State(state): State<AppState>,
    Json(body): Json<CleanupRequest>,
) -> Result<ApiResponse<()>, AppError> {
    let deleted = state
        .conversation_service
        .expire_older_than(body.days)
        .await?;

    Ok(ApiResponse::ok()
        .with_field("deleted", deleted)
        .with_message(format!("Deleted {deleted} old conversations")))
}

fn parse_sender(raw: Option<&str>) -> Result<SenderType, AppError> {
    match raw {
        None => Ok(SenderType::Buyer),
        Some(value) => value
            .parse()
            .map_err(|e: String| AppError::Validation(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sender_defaults_to_buyer() {
        assert_eq!(parse_sender(None).unwrap(), SenderType::Buyer);
        assert_eq!(parse_sender(Some("seller")).unwrap(), SenderType::Seller);
        assert!(parse_sender(Some("admin")).is_err());
    }

    #[test]
    fn test_send_request_accepts_minimal_body() {
        let body: SendMessageRequest = serde_json::from_str(r#"{"message": "hi"}"#).unwrap();
        assert_eq!(body.message, "hi");
        assert!(body.sender_type.is_none());
    }
}
