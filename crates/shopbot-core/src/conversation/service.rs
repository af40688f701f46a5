//! Conversation service orchestrating thread lifecycle and message delivery.
//!
//! State machine per session: `NoConversation -> Active -> Closed`. Closed is
//! terminal for a row; starting always mints a fresh active conversation and
//! closes the previous one as a side effect.

use chrono::{Duration, Utc};
use shopbot_types::conversation::{Conversation, ConversationSummary, Message, SenderType};
use shopbot_types::error::ConversationError;
use tracing::info;
use uuid::Uuid;

use crate::conversation::repository::ConversationRepository;

/// Default cap on messages returned per conversation.
pub const DEFAULT_MESSAGE_LIMIT: i64 = 100;

/// Default retention for the expiry sweep, in days.
pub const DEFAULT_RETENTION_DAYS: i64 = 1;

/// Stateless orchestration over a [`ConversationRepository`].
pub struct ConversationService<R: ConversationRepository> {
    repo: R,
}

impl<R: ConversationRepository> ConversationService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Rotate the session onto a fresh active conversation.
    ///
    /// Every call produces a new conversation id; any previously active
    /// conversation for the session is closed (never deleted). Callers should
    /// invoke this once per logical chat session and address messages by the
    /// returned id afterwards.
    pub async fn start_or_get(&self, session_id: &str) -> Result<Conversation, ConversationError> {
        let conversation = self.repo.rotate_active(session_id).await?;
        info!(
            conversation_id = %conversation.id,
            session_id,
            "Started conversation"
        );
        Ok(conversation)
    }

    /// Append a message to a conversation and touch its `updated_at`.
    pub async fn send(
        &self,
        conversation_id: &Uuid,
        sender: SenderType,
        text: &str,
    ) -> Result<Message, ConversationError> {
        let message = self.repo.append_message(conversation_id, sender, text).await?;
        info!(conversation_id = %conversation_id, sender = %sender, "Message sent");
        Ok(message)
    }

    /// Messages for a conversation, oldest first; `limit` defaults to 100.
    pub async fn messages(
        &self,
        conversation_id: &Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<Message>, ConversationError> {
        Ok(self
            .repo
            .messages(conversation_id, limit.unwrap_or(DEFAULT_MESSAGE_LIMIT))
            .await?)
    }

    /// Active conversations with at least one message, for the seller inbox.
    ///
    /// Zero-message conversations are excluded deliberately: an empty thread
    /// is not yet a real interaction.
    pub async fn list_active(&self) -> Result<Vec<ConversationSummary>, ConversationError> {
        Ok(self.repo.active_with_messages().await?)
    }

    /// The session's current active conversation, if it has one.
    pub async fn find_by_session(
        &self,
        session_id: &str,
    ) -> Result<Option<Conversation>, ConversationError> {
        Ok(self.repo.find_active_by_session(session_id).await?)
    }

    /// Delete conversations (and, by cascade, their messages) created more
    /// than `days` days ago. Returns the number of conversations deleted.
    pub async fn expire_older_than(&self, days: Option<i64>) -> Result<u64, ConversationError> {
        let days = days.unwrap_or(DEFAULT_RETENTION_DAYS);
        let cutoff = Utc::now() - Duration::days(days);
        let deleted = self.repo.delete_older_than(cutoff).await?;
        if deleted > 0 {
            info!(deleted, days, "Expired old conversations");
        }
        Ok(deleted)
    }
}
