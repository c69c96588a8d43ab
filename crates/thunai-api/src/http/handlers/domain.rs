//! Domain catalog handler.

use std::time::Instant;

use axum::extract::{Path, State};
use axum::Json;

use thunai_types::domain::DomainInfo;

use crate::http::error::AppError;
use crate::http::extractors::auth::CurrentUser;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/domains - List the domain catalog with offered models.
pub async fn list_domains(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<ApiResponse<Vec<DomainInfo>>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let domains: Vec<DomainInfo> = state.registry.iter().cloned().collect();
    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(domains, request_id, elapsed)
        .with_link("self", "/api/v1/domains");

    Ok(Json(resp))
}

/// GET /api/v1/domains/:key - Look up a single domain by key.
///
/// 404 for keys outside the catalog.
pub async fn get_domain(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(key): Path<String>,
) -> Result<Json<ApiResponse<DomainInfo>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let domain = state
        .registry
        .resolve(&key)
        .cloned()
        .ok_or_else(|| AppError::DomainNotFound(key.clone()))?;
    let elapsed = start.elapsed().as_millis() as u64;

    let self_link = format!("/api/v1/domains/{key}");
    let resp = ApiResponse::success(domain, request_id, elapsed).with_link("self", &self_link);

    Ok(Json(resp))
}
