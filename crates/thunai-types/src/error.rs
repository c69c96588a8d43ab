use thiserror::Error;

use crate::llm::InferenceError;

/// Errors from repository operations (used by trait definitions in thunai-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors from the conversation lifecycle.
///
/// `ConversationNotFound` covers both a genuinely absent conversation and
/// one owned by another user: callers must not be able to tell the two
/// apart, so there is no separate Forbidden variant.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("domain '{0}' is not registered")]
    UnknownDomain(String),

    #[error("model '{model}' is not offered for domain '{domain}'")]
    ModelNotInDomain { domain: String, model: String },

    #[error("message must not be empty")]
    EmptyMessage,

    #[error("conversation not found")]
    ConversationNotFound,

    /// Inference failed after the user message was already persisted.
    /// The conversation id is carried so the client can retry the same
    /// thread instead of spawning a duplicate.
    #[error("inference failed: {source}")]
    Inference {
        conversation_id: uuid::Uuid,
        source: InferenceError,
    },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Errors from the upload manager.
///
/// Like `ChatError`, an unowned conversation reference is reported as
/// `ConversationNotFound`, identical to a missing one.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("no file provided")]
    NoFileProvided,

    #[error("file type '{0}' is not allowed")]
    InvalidFileType(String),

    #[error("file exceeds the maximum size of {limit} bytes (got {actual})")]
    TooLarge { limit: u64, actual: u64 },

    #[error("conversation not found")]
    ConversationNotFound,

    #[error("blob store error: {0}")]
    Blob(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Errors from the contact form.
#[derive(Debug, Error)]
pub enum ContactError {
    #[error("field '{0}' must not be empty")]
    MissingField(&'static str),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Errors from user registration and lookup.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("field '{0}' must not be empty")]
    MissingField(&'static str),

    #[error("username or email already taken")]
    AlreadyExists,

    #[error("user not found")]
    NotFound,

    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for UserError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict(_) => UserError::AlreadyExists,
            RepositoryError::NotFound => UserError::NotFound,
            other => UserError::Repository(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_chat_error_hides_ownership() {
        // Absent and unowned conversations share one variant and one message.
        let err = ChatError::ConversationNotFound;
        assert_eq!(err.to_string(), "conversation not found");
    }

    #[test]
    fn test_conflict_maps_to_already_exists() {
        let err: UserError = RepositoryError::Conflict("users.username".to_string()).into();
        assert!(matches!(err, UserError::AlreadyExists));
    }

    #[test]
    fn test_upload_error_display() {
        let err = UploadError::InvalidFileType("exe".to_string());
        assert_eq!(err.to_string(), "file type 'exe' is not allowed");

        let err = UploadError::TooLarge {
            limit: 16,
            actual: 32,
        };
        assert!(err.to_string().contains("16"));
        assert!(err.to_string().contains("32"));
    }
}
