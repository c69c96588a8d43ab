//! Conversation history handlers.

use std::time::Instant;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use thunai_types::chat::{Conversation, ConversationSummary, Message};

use crate::http::error::AppError;
use crate::http::extractors::auth::CurrentUser;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for explicit conversation creation.
#[derive(Debug, Deserialize)]
pub struct CreateConversationRequest {
    pub domain: String,
    pub model: String,
    pub title: Option<String>,
}

/// A conversation with its full transcript.
#[derive(Debug, Serialize)]
pub struct ConversationDetail {
    pub conversation: Conversation,
    pub messages: Vec<Message>,
}

/// POST /api/v1/conversations - Create an empty conversation up front.
///
/// The race-free alternative to lazy creation via /chat: the returned id
/// is passed with every subsequent turn.
pub async fn create_conversation(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(body): Json<CreateConversationRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let conversation = state
        .chat_service
        .start_conversation(user_id, &body.domain, &body.model, body.title)
        .await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let self_link = format!("/api/v1/conversations/{}", conversation.id);
    let resp = ApiResponse::success(json!(conversation), request_id, elapsed)
        .with_link("self", &self_link)
        .with_link("chat", "/api/v1/chat");

    Ok(Json(resp))
}

/// GET /api/v1/conversations - List the caller's conversations.
///
/// Newest-first, each with its message count; zero-message conversations
/// are included.
pub async fn list_conversations(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<ApiResponse<Vec<ConversationSummary>>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let conversations = state.chat_service.list_conversations(user_id).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(conversations, request_id, elapsed)
        .with_link("self", "/api/v1/conversations");

    Ok(Json(resp))
}

/// GET /api/v1/conversations/:id - Fetch one conversation with its
/// transcript, oldest message first.
pub async fn get_conversation(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(conversation_id): Path<Uuid>,
) -> Result<Json<ApiResponse<ConversationDetail>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let (conversation, messages) = state
        .chat_service
        .get_conversation(user_id, conversation_id)
        .await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let self_link = format!("/api/v1/conversations/{conversation_id}");
    let resp = ApiResponse::success(
        ConversationDetail {
            conversation,
            messages,
        },
        request_id,
        elapsed,
    )
    .with_link("self", &self_link);

    Ok(Json(resp))
}
