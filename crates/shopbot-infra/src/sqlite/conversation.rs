//! SQLite conversation repository implementation.
//!
//! The two multi-statement sequences -- rotation (close-then-insert) and
//! append-plus-touch -- each run inside a transaction on the writer pool, so
//! the at-most-one-active-per-session invariant holds under concurrent
//! requests and a send never loses its timestamp touch.

use chrono::{DateTime, Utc};
use shopbot_core::conversation::repository::ConversationRepository;
use shopbot_types::conversation::{
    Conversation, ConversationStatus, ConversationSummary, Message, SenderType,
};
use shopbot_types::error::RepositoryError;
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime};

/// SQLite-backed implementation of `ConversationRepository`.
pub struct SqliteConversationRepository {
    pool: DatabasePool,
}

impl SqliteConversationRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

/// Internal row type for mapping SQLite rows to domain Conversation.
struct ConversationRow {
    id: String,
    session_id: String,
    status: String,
    created_at: String,
    updated_at: String,
}

impl ConversationRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            session_id: row.try_get("session_id")?,
            status: row.try_get("status")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_conversation(self) -> Result<Conversation, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid conversation id: {e}")))?;
        let status: ConversationStatus = self
            .status
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;

        Ok(Conversation {
            id,
            session_id: self.session_id,
            status,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

/// Internal row type for mapping SQLite rows to domain Message.
struct MessageRow {
    id: String,
    conversation_id: String,
    sender_type: String,
    message: String,
    created_at: String,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            conversation_id: row.try_get("conversation_id")?,
            sender_type: row.try_get("sender_type")?,
            message: row.try_get("message")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_message(self) -> Result<Message, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid message id: {e}")))?;
        let conversation_id = Uuid::parse_str(&self.conversation_id)
            .map_err(|e| RepositoryError::Query(format!("invalid conversation_id: {e}")))?;
        let sender_type: SenderType = self
            .sender_type
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;

        Ok(Message {
            id,
            conversation_id,
            sender_type,
            message: self.message,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

// ---------------------------------------------------------------------------
// ConversationRepository implementation
// ---------------------------------------------------------------------------

impl ConversationRepository for SqliteConversationRepository {
    async fn rotate_active(&self, session_id: &str) -> Result<Conversation, RepositoryError> {
        let now = Utc::now();
        let conversation = Conversation {
            id: Uuid::now_v7(),
            session_id: session_id.to_string(),
            status: ConversationStatus::Active,
            created_at: now,
            updated_at: now,
        };

        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        sqlx::query(
            "UPDATE conversations SET status = 'closed', updated_at = ? WHERE session_id = ? AND status = 'active'",
        )
        .bind(format_datetime(&now))
        .bind(session_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        sqlx::query(
            "INSERT INTO conversations (id, session_id, status, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(conversation.id.to_string())
        .bind(session_id)
        .bind(conversation.status.to_string())
        .bind(format_datetime(&conversation.created_at))
        .bind(format_datetime(&conversation.updated_at))
        .execute(&mut *tx)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(conversation)
    }

    async fn append_message(
        &self,
        conversation_id: &Uuid,
        sender: SenderType,
        text: &str,
    ) -> Result<Message, RepositoryError> {
        let message = Message {
            id: Uuid::now_v7(),
            conversation_id: *conversation_id,
            sender_type: sender,
            message: text.to_string(),
            created_at: Utc::now(),
        };

        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let exists = sqlx::query("SELECT id FROM conversations WHERE id = ?")
            .bind(conversation_id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        if exists.is_none() {
            return Err(RepositoryError::NotFound);
        }

        sqlx::query(
            r#"INSERT INTO messages (id, conversation_id, sender_type, message, created_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(message.id.to_string())
        .bind(conversation_id.to_string())
        .bind(sender.to_string())
        .bind(text)
        .bind(format_datetime(&message.created_at))
        .execute(&mut *tx)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        sqlx::query("UPDATE conversations SET updated_at = ? WHERE id = ?")
            .bind(format_datetime(&message.created_at))
            .bind(conversation_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(message)
    }

    async fn messages(
        &self,
        conversation_id: &Uuid,
        limit: i64,
    ) -> Result<Vec<Message>, RepositoryError> {
        // UUID v7 ids are time-sortable; they break ties between messages
        // created within the same timestamp granule.
        let sql = format!(
            "SELECT * FROM messages WHERE conversation_id = ? ORDER BY created_at ASC, id ASC LIMIT {limit}"
        );
        let rows = sqlx::query(&sql)
            .bind(conversation_id.to_string())
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in &rows {
            let msg_row =
                MessageRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            messages.push(msg_row.into_message()?);
        }

        Ok(messages)
    }

    async fn active_with_messages(&self) -> Result<Vec<ConversationSummary>, RepositoryError> {
        let rows = sqlx::query(
            r#"SELECT c.id, c.session_id, c.created_at, c.updated_at,
                      (SELECT COUNT(*) FROM messages m WHERE m.conversation_id = c.id) AS message_count,
                      (SELECT m.message FROM messages m WHERE m.conversation_id = c.id
                       ORDER BY m.created_at DESC, m.id DESC LIMIT 1) AS last_message,
                      (SELECT m.created_at FROM messages m WHERE m.conversation_id = c.id
                       ORDER BY m.created_at DESC, m.id DESC LIMIT 1) AS last_message_time
               FROM conversations c
               WHERE c.status = 'active'
                 AND EXISTS (SELECT 1 FROM messages m WHERE m.conversation_id = c.id)
               ORDER BY c.updated_at DESC"#,
        )
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut summaries = Vec::with_capacity(rows.len());
        for row in &rows {
            let id: String = row
                .try_get("id")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            let session_id: String = row
                .try_get("session_id")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            let created_at: String = row
                .try_get("created_at")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            let updated_at: String = row
                .try_get("updated_at")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            let message_count: i64 = row
                .try_get("message_count")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            let last_message: Option<String> = row
                .try_get("last_message")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            let last_message_time: Option<String> = row
                .try_get("last_message_time")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;

            summaries.push(ConversationSummary {
                id: Uuid::parse_str(&id)
                    .map_err(|e| RepositoryError::Query(format!("invalid conversation id: {e}")))?,
                session_id,
                created_at: parse_datetime(&created_at)?,
                updated_at: parse_datetime(&updated_at)?,
                message_count,
                last_message,
                last_message_time: last_message_time.as_deref().map(parse_datetime).transpose()?,
            });
        }

        Ok(summaries)
    }

    async fn find_active_by_session(
        &self,
        session_id: &str,
    ) -> Result<Option<Conversation>, RepositoryError> {
        let row = sqlx::query(
            r#"SELECT * FROM conversations
               WHERE session_id = ? AND status = 'active'
               ORDER BY created_at DESC LIMIT 1"#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let conv_row = ConversationRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(conv_row.into_conversation()?))
            }
            None => Ok(None),
        }
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, RepositoryError> {
        // RFC 3339 text with fixed precision compares lexicographically.
        let result = sqlx::query("DELETE FROM conversations WHERE created_at < ?")
            .bind(format_datetime(&cutoff))
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::DatabasePool;
    use chrono::Duration;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    async fn count_active(pool: &DatabasePool, session_id: &str) -> i64 {
        let row = sqlx::query(
            "SELECT COUNT(*) AS cnt FROM conversations WHERE session_id = ? AND status = 'active'",
        )
        .bind(session_id)
        .fetch_one(&pool.reader)
        .await
        .unwrap();
        row.try_get("cnt").unwrap()
    }

    #[tokio::test]
    async fn test_rotation_keeps_single_active_conversation() {
        let pool = test_pool().await;
        let repo = SqliteConversationRepository::new(pool.clone());

        let first = repo.rotate_active("s1").await.unwrap();
        let second = repo.rotate_active("s1").await.unwrap();
        assert_ne!(first.id, second.id);

        assert_eq!(count_active(&pool, "s1").await, 1);

        // The first conversation is closed, not deleted.
        let row = sqlx::query("SELECT status FROM conversations WHERE id = ?")
            .bind(first.id.to_string())
            .fetch_one(&pool.reader)
            .await
            .unwrap();
        let status: String = row.try_get("status").unwrap();
        assert_eq!(status, "closed");
    }

    #[tokio::test]
    async fn test_rotation_is_per_session() {
        let pool = test_pool().await;
        let repo = SqliteConversationRepository::new(pool.clone());

        repo.rotate_active("alice").await.unwrap();
        repo.rotate_active("bob").await.unwrap();
        repo.rotate_active("alice").await.unwrap();

        assert_eq!(count_active(&pool, "alice").await, 1);
        assert_eq!(count_active(&pool, "bob").await, 1);
    }

    #[tokio::test]
    async fn test_append_message_and_touch() {
        let pool = test_pool().await;
        let repo = SqliteConversationRepository::new(pool.clone());

        let conversation = repo.rotate_active("s1").await.unwrap();
        let sent = repo
            .append_message(&conversation.id, SenderType::Buyer, "Is this in stock?")
            .await
            .unwrap();
        assert_eq!(sent.message, "Is this in stock?");

        let touched = repo
            .find_active_by_session("s1")
            .await
            .unwrap()
            .unwrap()
            .updated_at;
        assert!(touched >= conversation.updated_at);
    }

    #[tokio::test]
    async fn test_append_to_missing_conversation_is_not_found() {
        let pool = test_pool().await;
        let repo = SqliteConversationRepository::new(pool);

        let err = repo
            .append_message(&Uuid::now_v7(), SenderType::Buyer, "hello?")
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_messages_ordered_ascending_and_capped() {
        let pool = test_pool().await;
        let repo = SqliteConversationRepository::new(pool);

        let conversation = repo.rotate_active("s1").await.unwrap();
        for text in ["one", "two", "three"] {
            repo.append_message(&conversation.id, SenderType::Buyer, text)
                .await
                .unwrap();
        }

        let messages = repo.messages(&conversation.id, 100).await.unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].message, "one");
        assert_eq!(messages[2].message, "three");
        assert!(messages.windows(2).all(|w| w[0].created_at <= w[1].created_at));

        let capped = repo.messages(&conversation.id, 2).await.unwrap();
        assert_eq!(capped.len(), 2);
        assert_eq!(capped[0].message, "one");
    }

    #[tokio::test]
    async fn test_active_listing_excludes_empty_conversations() {
        let pool = test_pool().await;
        let repo = SqliteConversationRepository::new(pool);

        let with_messages = repo.rotate_active("alice").await.unwrap();
        repo.append_message(&with_messages.id, SenderType::Buyer, "hello")
            .await
            .unwrap();
        repo.append_message(&with_messages.id, SenderType::Seller, "hi, how can I help?")
            .await
            .unwrap();

        // bob starts a conversation but never writes.
        repo.rotate_active("bob").await.unwrap();

        let summaries = repo.active_with_messages().await.unwrap();
        assert_eq!(summaries.len(), 1);
        let summary = &summaries[0];
        assert_eq!(summary.id, with_messages.id);
        assert_eq!(summary.message_count, 2);
        assert_eq!(summary.last_message.as_deref(), Some("hi, how can I help?"));
        assert!(summary.last_message_time.is_some());
    }

    #[tokio::test]
    async fn test_active_listing_most_recent_first() {
        let pool = test_pool().await;
        let repo = SqliteConversationRepository::new(pool);

        let older = repo.rotate_active("alice").await.unwrap();
        repo.append_message(&older.id, SenderType::Buyer, "first")
            .await
            .unwrap();

        let newer = repo.rotate_active("bob").await.unwrap();
        repo.append_message(&newer.id, SenderType::Buyer, "second")
            .await
            .unwrap();

        let summaries = repo.active_with_messages().await.unwrap();
        assert_eq!(summaries[0].id, newer.id);
        assert_eq!(summaries[1].id, older.id);
    }

    #[tokio::test]
    async fn test_find_by_session() {
        let pool = test_pool().await;
        let repo = SqliteConversationRepository::new(pool);

        assert!(repo.find_active_by_session("s1").await.unwrap().is_none());

        repo.rotate_active("s1").await.unwrap();
        let latest = repo.rotate_active("s1").await.unwrap();

        let found = repo.find_active_by_session("s1").await.unwrap().unwrap();
        assert_eq!(found.id, latest.id);
        assert_eq!(found.status, ConversationStatus::Active);
    }

    #[tokio::test]
    async fn test_expiry_deletes_old_conversations_and_cascades() {
        let pool = test_pool().await;
        let repo = SqliteConversationRepository::new(pool.clone());

        // A fresh conversation with a message: must survive.
        let fresh = repo.rotate_active("fresh").await.unwrap();
        repo.append_message(&fresh.id, SenderType::Buyer, "keep me")
            .await
            .unwrap();

        // Backdate a second conversation two days, with a message.
        let stale = repo.rotate_active("stale").await.unwrap();
        repo.append_message(&stale.id, SenderType::Buyer, "sweep me")
            .await
            .unwrap();
        let two_days_ago = Utc::now() - Duration::days(2);
        sqlx::query("UPDATE conversations SET created_at = ? WHERE id = ?")
            .bind(format_datetime(&two_days_ago))
            .bind(stale.id.to_string())
            .execute(&pool.writer)
            .await
            .unwrap();

        let cutoff = Utc::now() - Duration::days(1);
        let deleted = repo.delete_older_than(cutoff).await.unwrap();
        assert_eq!(deleted, 1);

        // The stale conversation and its messages are gone.
        assert!(repo.find_active_by_session("stale").await.unwrap().is_none());
        assert!(repo.messages(&stale.id, 100).await.unwrap().is_empty());

        // The fresh one is untouched.
        assert_eq!(repo.messages(&fresh.id, 100).await.unwrap().len(), 1);

        // Nothing left to delete.
        assert_eq!(repo.delete_older_than(cutoff).await.unwrap(), 0);
    }
}
