//! ConversationRepository trait definition.
//!
//! Multi-statement sequences (rotation, append-plus-touch) are atomic in the
//! implementation: each runs inside a single transaction so concurrent
//! requests for the same session cannot observe two active conversations or
//! lose a timestamp touch.

use chrono::{DateTime, Utc};
use shopbot_types::conversation::{Conversation, ConversationSummary, Message, SenderType};
use shopbot_types::error::RepositoryError;
use uuid::Uuid;

/// Repository trait for conversation and message persistence.
pub trait ConversationRepository: Send + Sync {
    /// Close any active conversation for the session and create a fresh one,
    /// in one transaction. Always returns a brand-new active conversation.
    fn rotate_active(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<Conversation, RepositoryError>> + Send;

    /// Append a message and touch the parent conversation's `updated_at`,
    /// in one transaction. `NotFound` when the conversation does not exist.
    fn append_message(
        &self,
        conversation_id: &Uuid,
        sender: SenderType,
        text: &str,
    ) -> impl std::future::Future<Output = Result<Message, RepositoryError>> + Send;

    /// Messages for a conversation, creation-time ascending, capped at `limit`.
    fn messages(
        &self,
        conversation_id: &Uuid,
        limit: i64,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, RepositoryError>> + Send;

    /// Active conversations holding at least one message, annotated with
    /// message stats, most-recently-updated first.
    fn active_with_messages(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<ConversationSummary>, RepositoryError>> + Send;

    /// Most-recently-created active conversation for a session, if any.
    fn find_active_by_session(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Conversation>, RepositoryError>> + Send;

    /// Delete conversations created before `cutoff` (messages cascade).
    /// Returns the number of conversations deleted.
    fn delete_older_than(
        &self,
        cutoff: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
