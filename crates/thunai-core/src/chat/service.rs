//! Chat service orchestrating the conversation lifecycle.
//!
//! ChatService decides create-vs-continue for an incoming turn, derives
//! titles for new conversations, persists user/assistant messages in the
//! correct order, and mediates the inference call. Generic over
//! `ConversationRepository` and `InferenceGateway` so thunai-core never
//! depends on thunai-infra.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use thunai_types::chat::{
    Conversation, ConversationSummary, InputType, Message, MessageRole, TurnReply,
};
use thunai_types::error::ChatError;

use crate::chat::repository::ConversationRepository;
use crate::chat::title::derive_title;
use crate::domain::DomainRegistry;
use crate::llm::InferenceGateway;

/// Orchestrates conversation lifecycle, message persistence, and inference.
pub struct ChatService<R: ConversationRepository, G: InferenceGateway> {
    repo: R,
    gateway: G,
    registry: Arc<DomainRegistry>,
}

impl<R: ConversationRepository, G: InferenceGateway> ChatService<R, G> {
    pub fn new(repo: R, gateway: G, registry: Arc<DomainRegistry>) -> Self {
        Self {
            repo,
            gateway,
            registry,
        }
    }

    /// Access the conversation repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Explicitly create an empty conversation and return it before any
    /// turns are accepted.
    ///
    /// This is the race-free alternative to lazy creation in
    /// [`submit_turn`]: a client that creates the conversation first and
    /// then sends turns with its id can never end up with duplicate
    /// threads, because the single insert here is the only creation point.
    pub async fn start_conversation(
        &self,
        user_id: Uuid,
        domain: &str,
        model: &str,
        title: Option<String>,
    ) -> Result<Conversation, ChatError> {
        self.check_domain_model(domain, model)?;

        let conversation = Conversation {
            id: Uuid::now_v7(),
            user_id,
            model: model.to_string(),
            domain: domain.to_string(),
            title,
            created_at: Utc::now(),
        };
        self.repo.create_conversation(&conversation).await?;
        info!(conversation_id = %conversation.id, domain, model, "conversation started");
        Ok(conversation)
    }

    /// Handle one chat turn: create or continue the conversation, persist
    /// the user message, invoke inference, persist the assistant reply.
    ///
    /// The user message is written strictly before the gateway call, so
    /// user input survives inference failure and mid-flight cancellation.
    /// On inference failure the error carries the conversation id and no
    /// assistant row is written; the client retries the same thread.
    pub async fn submit_turn(
        &self,
        user_id: Uuid,
        domain: &str,
        model: &str,
        conversation_id: Option<Uuid>,
        message: &str,
    ) -> Result<TurnReply, ChatError> {
        let utterance = message.trim();
        if utterance.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        self.check_domain_model(domain, model)?;

        let conversation_id = match conversation_id {
            Some(id) => {
                // Joint (id, owner) lookup: absent and other-owned look identical.
                self.repo
                    .get_conversation(&id, &user_id)
                    .await?
                    .ok_or(ChatError::ConversationNotFound)?
                    .id
            }
            None => {
                let conversation = Conversation {
                    id: Uuid::now_v7(),
                    user_id,
                    model: model.to_string(),
                    domain: domain.to_string(),
                    title: Some(derive_title(utterance)),
                    created_at: Utc::now(),
                };
                self.repo.create_conversation(&conversation).await?;
                info!(conversation_id = %conversation.id, domain, model, "conversation created");
                conversation.id
            }
        };

        self.repo
            .save_message(&new_message(
                conversation_id,
                user_id,
                MessageRole::User,
                utterance.to_string(),
            ))
            .await?;

        let reply = match self.gateway.generate(model, utterance).await {
            Ok(text) => text,
            Err(source) => {
                warn!(conversation_id = %conversation_id, model, %source, "inference failed");
                return Err(ChatError::Inference {
                    conversation_id,
                    source,
                });
            }
        };

        // The one failure that loses generated content: inference succeeded
        // but the reply could not be persisted. Logged distinctly because
        // the caller only sees a generic storage error.
        if let Err(err) = self
            .repo
            .save_message(&new_message(
                conversation_id,
                user_id,
                MessageRole::Assistant,
                reply.clone(),
            ))
            .await
        {
            error!(
                conversation_id = %conversation_id,
                model,
                %err,
                "assistant reply generated but could not be persisted"
            );
            return Err(err.into());
        }

        Ok(TurnReply {
            conversation_id,
            reply,
        })
    }

    /// List the user's conversations newest-first with message counts.
    pub async fn list_conversations(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ConversationSummary>, ChatError> {
        Ok(self.repo.list_conversations(&user_id).await?)
    }

    /// Fetch one conversation and its ordered transcript, owner-scoped.
    pub async fn get_conversation(
        &self,
        user_id: Uuid,
        conversation_id: Uuid,
    ) -> Result<(Conversation, Vec<Message>), ChatError> {
        let conversation = self
            .repo
            .get_conversation(&conversation_id, &user_id)
            .await?
            .ok_or(ChatError::ConversationNotFound)?;
        let messages = self.repo.get_messages(&conversation_id, &user_id).await?;
        Ok((conversation, messages))
    }

    fn check_domain_model(&self, domain: &str, model: &str) -> Result<(), ChatError> {
        let info = self
            .registry
            .resolve(domain)
            .ok_or_else(|| ChatError::UnknownDomain(domain.to_string()))?;
        if !info.models.iter().any(|m| m == model) {
            return Err(ChatError::ModelNotInDomain {
                domain: domain.to_string(),
                model: model.to_string(),
            });
        }
        Ok(())
    }
}

fn new_message(
    conversation_id: Uuid,
    user_id: Uuid,
    role: MessageRole,
    content: String,
) -> Message {
    Message {
        id: Uuid::now_v7(),
        conversation_id,
        user_id,
        role,
        content,
        input_type: InputType::Text,
        file_id: None,
        created_at: Utc::now(),
    }
}
