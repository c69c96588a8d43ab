//! Inference backend request/response types.
//!
//! The backend is consumed through a single request/response contract:
//! given a model identifier and a prompt, it returns generated text or a
//! typed error. No streaming, no retry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Role of a message in a conversation with the backend.
///
/// Closed set: persisted rows carry exactly `user` or `assistant`
/// (enforced by a CHECK constraint in the schema as well).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A single prompt message sent to the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: MessageRole,
    pub content: String,
}

/// Errors from the inference backend.
///
/// Every failure mode is surfaced with a human-readable message; the
/// gateway never returns partial output alongside an error.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("model '{0}' is not available on the backend")]
    ModelNotFound(String),

    #[error("inference backend unreachable: {0}")]
    Unreachable(String),

    #[error("inference request timed out after {0}s")]
    Timeout(u64),

    #[error("backend error: {0}")]
    Backend(String),

    #[error("malformed backend response: {0}")]
    Deserialization(String),
}
