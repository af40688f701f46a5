//! Buyer-seller conversation and message types.
//!
//! A conversation belongs to one client session. At most one conversation per
//! session is `active` at any instant: starting a new one closes the previous
//! one first. Messages are immutable and ordered by creation time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a conversation.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (status IN ('active', 'closed'))`. Closed is terminal -- a session
/// gets a fresh conversation row rather than reopening an old one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationStatus {
    Active,
    Closed,
}

impl fmt::Display for ConversationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversationStatus::Active => write!(f, "active"),
            ConversationStatus::Closed => write!(f, "closed"),
        }
    }
}

impl FromStr for ConversationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(ConversationStatus::Active),
            "closed" => Ok(ConversationStatus::Closed),
            other => Err(format!("invalid conversation status: '{other}'")),
        }
    }
}

impl Default for ConversationStatus {
    fn default() -> Self {
        ConversationStatus::Active
    }
}

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderType {
    Buyer,
    Seller,
}

impl fmt::Display for SenderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SenderType::Buyer => write!(f, "buyer"),
            SenderType::Seller => write!(f, "seller"),
        }
    }
}

impl FromStr for SenderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "buyer" => Ok(SenderType::Buyer),
            "seller" => Ok(SenderType::Seller),
            other => Err(format!("invalid sender type: '{other}'")),
        }
    }
}

impl Default for SenderType {
    fn default() -> Self {
        SenderType::Buyer
    }
}

/// A conversation thread between a buyer session and the seller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: Uuid,
    pub session_id: String,
    pub status: ConversationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single message within a conversation.
///
/// Immutable once created; no edit or delete operation exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub sender_type: SenderType,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// An active conversation annotated with message stats, for the seller inbox.
///
/// Conversations with zero messages are excluded from inbox listings, so
/// `last_message`/`last_message_time` are populated in practice; they stay
/// optional because the annotation query leaves them NULL for empty threads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: Uuid,
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub message_count: i64,
    pub last_message: Option<String>,
    pub last_message_time: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation_status_roundtrip() {
        for status in [ConversationStatus::Active, ConversationStatus::Closed] {
            let s = status.to_string();
            let parsed: ConversationStatus = s.parse().unwrap();
            assert_eq!(status, parsed);
        }
    }

    #[test]
    fn test_conversation_status_serde() {
        let json = serde_json::to_string(&ConversationStatus::Active).unwrap();
        assert_eq!(json, "\"active\"");
        assert!("reopened".parse::<ConversationStatus>().is_err());
    }

    #[test]
    fn test_sender_type_roundtrip() {
        for sender in [SenderType::Buyer, SenderType::Seller] {
            let parsed: SenderType = sender.to_string().parse().unwrap();
            assert_eq!(sender, parsed);
        }
        assert_eq!(SenderType::default(), SenderType::Buyer);
    }

    #[test]
    fn test_message_serialize() {
        let msg = Message {
            id: Uuid::now_v7(),
            conversation_id: Uuid::now_v7(),
            sender_type: SenderType::Seller,
            message: "On its way!".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["sender_type"], "seller");
        assert_eq!(json["message"], "On its way!");
    }
}
