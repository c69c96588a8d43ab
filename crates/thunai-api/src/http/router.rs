//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`. Middleware: CORS, tracing, and a body
//! limit sized for the upload cap.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use thunai_types::upload::MAX_UPLOAD_BYTES;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Registration (unauthenticated) and the authenticated account view
        .route("/users", post(handlers::user::create_user))
        .route("/users/me", get(handlers::user::get_me))
        // Domain catalog
        .route("/domains", get(handlers::domain::list_domains))
        .route("/domains/{key}", get(handlers::domain::get_domain))
        // Chat turns
        .route("/chat", post(handlers::chat::submit_turn))
        // Conversations
        .route(
            "/conversations",
            get(handlers::conversation::list_conversations)
                .post(handlers::conversation::create_conversation),
        )
        .route(
            "/conversations/{id}",
            get(handlers::conversation::get_conversation),
        )
        // Uploads
        .route(
            "/uploads",
            get(handlers::upload::list_uploads).post(handlers::upload::upload_file),
        )
        // Contact form (unauthenticated)
        .route("/contact", post(handlers::contact::submit_contact));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        // Leave headroom above the upload cap for multipart framing; the
        // service enforces the exact limit.
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES as usize + 64 * 1024))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint (no auth required).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
