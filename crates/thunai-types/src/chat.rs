//! Conversation and message types.
//!
//! A conversation is a user-owned thread tied to one domain and one model.
//! Messages within it are append-only and ordered by creation time, with
//! insertion order breaking ties.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

// Re-export MessageRole from the llm module (used in both contexts).
pub use crate::llm::MessageRole;

/// How a message entered the system. Currently always `text`; kept as a
/// closed enum so new input kinds extend the type rather than a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Text,
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputType::Text => write!(f, "text"),
        }
    }
}

impl FromStr for InputType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(InputType::Text),
            other => Err(format!("invalid input type: '{other}'")),
        }
    }
}

/// A conversation thread owned by exactly one user.
///
/// Created lazily by the first turn (or explicitly via the start-conversation
/// operation); immutable after creation apart from its growing message list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub model: String,
    pub domain: String,
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A conversation as listed in history, with its aggregate message count.
///
/// Conversations with no messages yet appear with `message_count` 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: Uuid,
    pub model: String,
    pub domain: String,
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
    pub message_count: u32,
}

/// A single message within a conversation. Append-only.
///
/// `user_id` is always the conversation owner: assistant messages are
/// attributed to the system acting on the owner's behalf.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub user_id: Uuid,
    pub role: MessageRole,
    pub content: String,
    pub input_type: InputType,
    /// Uploaded file associated with this message, if any.
    pub file_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Result of a successful chat turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnReply {
    pub conversation_id: Uuid,
    pub reply: String,
}
