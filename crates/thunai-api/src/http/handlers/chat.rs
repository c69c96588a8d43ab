//! Chat turn handler.

use std::time::Instant;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use thunai_types::chat::TurnReply;

use crate::http::error::AppError;
use crate::http::extractors::auth::CurrentUser;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for a chat turn.
#[derive(Debug, Deserialize)]
pub struct ChatTurnRequest {
    pub domain: String,
    pub model: String,
    /// Existing conversation to continue; if absent, a new conversation is
    /// created from this turn.
    pub conversation_id: Option<Uuid>,
    pub message: String,
}

/// POST /api/v1/chat - Submit one chat turn.
///
/// Creates or continues a conversation, persists the user message, runs
/// inference, persists the reply. On inference failure the 502 body
/// carries the conversation id so the client can retry the same thread.
pub async fn submit_turn(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(body): Json<ChatTurnRequest>,
) -> Result<Json<ApiResponse<TurnReply>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let reply = state
        .chat_service
        .submit_turn(
            user_id,
            &body.domain,
            &body.model,
            body.conversation_id,
            &body.message,
        )
        .await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let conversation_link = format!("/api/v1/conversations/{}", reply.conversation_id);
    let resp = ApiResponse::success(reply, request_id, elapsed)
        .with_link("conversation", &conversation_link);

    Ok(Json(resp))
}
