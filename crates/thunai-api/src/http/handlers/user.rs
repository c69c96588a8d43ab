//! User registration handler.

use std::time::Instant;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use thunai_types::user::User;

use crate::http::error::AppError;
use crate::http::extractors::auth::CurrentUser;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    /// Opaque credential from the fronting auth service; stored, never
    /// verified here.
    pub credential: String,
}

/// Registration response: the account plus the one-time plaintext token.
#[derive(Debug, Serialize)]
pub struct CreateUserResponse {
    pub user: User,
    /// Shown exactly once; only its hash is stored.
    pub token: String,
}

/// POST /api/v1/users - Register a user and issue an access token.
///
/// The only unauthenticated write endpoint besides /contact.
pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let registration = state
        .user_service
        .register(&body.username, &body.email, &body.credential)
        .await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let payload = json!(CreateUserResponse {
        user: registration.user,
        token: registration.token,
    });
    let resp = ApiResponse::success(payload, request_id, elapsed)
        .with_link("conversations", "/api/v1/conversations")
        .with_link("domains", "/api/v1/domains");

    Ok(Json(resp))
}

/// GET /api/v1/users/me - The account behind the presented token.
pub async fn get_me(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let user = state.user_service.get_user(&user_id).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(user, request_id, elapsed)
        .with_link("self", "/api/v1/users/me");

    Ok(Json(resp))
}
