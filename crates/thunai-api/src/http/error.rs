//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use thunai_types::error::{ChatError, ContactError, UploadError, UserError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Conversation lifecycle errors.
    Chat(ChatError),
    /// Upload errors.
    Upload(UploadError),
    /// Contact form errors.
    Contact(ContactError),
    /// User registration and lookup errors.
    User(UserError),
    /// Registry lookup for a key outside the catalog.
    DomainNotFound(String),
    /// Authentication failure.
    Unauthorized(String),
    /// Validation error.
    Validation(String),
    /// Generic internal error.
    Internal(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl From<UploadError> for AppError {
    fn from(e: UploadError) -> Self {
        AppError::Upload(e)
    }
}

impl From<ContactError> for AppError {
    fn from(e: ContactError) -> Self {
        AppError::Contact(e)
    }
}

impl From<UserError> for AppError {
    fn from(e: UserError) -> Self {
        AppError::User(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut details = None;
        let (status, code, message) = match &self {
            AppError::Chat(ChatError::UnknownDomain(domain)) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                format!("Domain '{domain}' is not registered"),
            ),
            AppError::Chat(ChatError::ModelNotInDomain { domain, model }) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                format!("Model '{model}' is not offered for domain '{domain}'"),
            ),
            AppError::Chat(ChatError::EmptyMessage) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Message must not be empty".to_string(),
            ),
            AppError::Chat(ChatError::ConversationNotFound) => (
                StatusCode::NOT_FOUND,
                "CONVERSATION_NOT_FOUND",
                "Conversation not found".to_string(),
            ),
            AppError::Chat(ChatError::Inference {
                conversation_id,
                source,
            }) => {
                // The user message is already persisted; the client retries
                // this conversation id instead of starting a new thread.
                details = Some(json!({ "conversation_id": conversation_id.to_string() }));
                (
                    StatusCode::BAD_GATEWAY,
                    "INFERENCE_FAILED",
                    source.to_string(),
                )
            }
            AppError::Chat(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CHAT_ERROR",
                e.to_string(),
            ),
            AppError::Upload(UploadError::NoFileProvided) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "No file provided".to_string(),
            ),
            AppError::Upload(UploadError::InvalidFileType(ext)) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                format!("File type '{ext}' is not allowed"),
            ),
            AppError::Upload(UploadError::TooLarge { limit, actual }) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "FILE_TOO_LARGE",
                format!("File exceeds the maximum size of {limit} bytes (got {actual})"),
            ),
            AppError::Upload(UploadError::ConversationNotFound) => (
                StatusCode::NOT_FOUND,
                "CONVERSATION_NOT_FOUND",
                "Conversation not found".to_string(),
            ),
            AppError::Upload(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "UPLOAD_ERROR",
                e.to_string(),
            ),
            AppError::Contact(ContactError::MissingField(field)) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                format!("Field '{field}' must not be empty"),
            ),
            AppError::Contact(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONTACT_ERROR",
                e.to_string(),
            ),
            AppError::User(UserError::MissingField(field)) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                format!("Field '{field}' must not be empty"),
            ),
            AppError::User(UserError::AlreadyExists) => (
                StatusCode::CONFLICT,
                "USER_CONFLICT",
                "Username or email already taken".to_string(),
            ),
            AppError::User(UserError::NotFound) => (
                StatusCode::NOT_FOUND,
                "USER_NOT_FOUND",
                "User not found".to_string(),
            ),
            AppError::User(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "USER_ERROR",
                e.to_string(),
            ),
            AppError::DomainNotFound(key) => (
                StatusCode::NOT_FOUND,
                "DOMAIN_NOT_FOUND",
                format!("Domain '{key}' is not registered"),
            ),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                msg.clone(),
            ),
        };

        let body = json!({
            "data": null,
            "meta": {
                "request_id": "",
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "response_time_ms": 0
            },
            "errors": [{
                "code": code,
                "message": message,
                "details": details,
            }]
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
