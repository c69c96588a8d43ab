//! Contact form handler.

use std::time::Instant;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for the contact form.
#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// POST /api/v1/contact - Record a contact form submission.
///
/// Unauthenticated: the form is reachable without an account.
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(body): Json<ContactRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let submission_id = state
        .contact_service
        .submit(&body.name, &body.email, &body.subject, &body.message)
        .await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(
        json!({ "id": submission_id.to_string() }),
        request_id,
        elapsed,
    );

    Ok(Json(resp))
}
