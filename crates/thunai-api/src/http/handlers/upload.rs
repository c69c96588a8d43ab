//! File upload handlers.

use std::time::Instant;

use axum::extract::{Multipart, State};
use axum::Json;
use serde_json::json;
use uuid::Uuid;

use thunai_types::error::UploadError;
use thunai_types::upload::UploadedFile;

use crate::http::error::AppError;
use crate::http::extractors::auth::CurrentUser;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/uploads - Store an uploaded file.
///
/// Multipart form with a `file` part and an optional `conversation_id`
/// text part naming a conversation the caller owns.
pub async fn upload_file(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let mut filename: Option<String> = None;
    let mut bytes: Option<Vec<u8>> = None;
    let mut conversation_id: Option<Uuid> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        match field.name() {
            Some("file") => {
                filename = field.file_name().map(|s| s.to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read file part: {e}")))?;
                bytes = Some(data.to_vec());
            }
            Some("conversation_id") => {
                let text = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read conversation_id part: {e}"))
                })?;
                conversation_id = Some(text.parse().map_err(|_| {
                    AppError::Validation(format!("Invalid conversation_id: '{text}'"))
                })?);
            }
            _ => {}
        }
    }

    let (Some(filename), Some(bytes)) = (filename, bytes) else {
        return Err(UploadError::NoFileProvided.into());
    };

    let stored = state
        .upload_service
        .store_upload(user_id, conversation_id, &filename, &bytes)
        .await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(json!(stored), request_id, elapsed)
        .with_link("self", "/api/v1/uploads");

    Ok(Json(resp))
}

/// GET /api/v1/uploads - List the caller's uploads, newest first.
pub async fn list_uploads(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<ApiResponse<Vec<UploadedFile>>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let files = state.upload_service.list_uploads(user_id).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(files, request_id, elapsed)
        .with_link("self", "/api/v1/uploads");

    Ok(Json(resp))
}
