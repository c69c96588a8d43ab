//! ConversationRepository trait definition.
//!
//! Persistence seam for conversations and their messages. Every lookup
//! that touches a single conversation takes the owning user id as well:
//! the trait deliberately has no way to fetch a conversation by id alone,
//! so cross-user reads are unrepresentable at this seam.

use thunai_types::chat::{Conversation, ConversationSummary, Message};
use thunai_types::error::RepositoryError;
use uuid::Uuid;

/// Repository trait for conversation and message persistence.
///
/// Implementations live in thunai-infra (e.g. `SqliteConversationRepository`).
/// Uses native async fn in traits (RPITIT).
pub trait ConversationRepository: Send + Sync {
    /// Insert a new conversation row.
    fn create_conversation(
        &self,
        conversation: &Conversation,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Fetch one conversation, scoped to its owner. Returns `None` both
    /// when the id is unknown and when it belongs to another user.
    fn get_conversation(
        &self,
        conversation_id: &Uuid,
        user_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<Conversation>, RepositoryError>> + Send;

    /// List a user's conversations newest-first, each with its aggregate
    /// message count (zero-message conversations included with count 0).
    fn list_conversations(
        &self,
        user_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<ConversationSummary>, RepositoryError>> + Send;

    /// Append a message. Messages are never updated or deleted.
    fn save_message(
        &self,
        message: &Message,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Fetch the transcript of a conversation ordered by creation time
    /// ascending, insertion order breaking ties. Owner-scoped like
    /// [`get_conversation`](Self::get_conversation): another user's
    /// conversation yields an empty transcript.
    fn get_messages(
        &self,
        conversation_id: &Uuid,
        user_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, RepositoryError>> + Send;
}
