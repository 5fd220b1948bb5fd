//! System health and status handlers.

use axum::Json;
use serde::Serialize;
use tracing::instrument;

use crate::api::ApiError;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[instrument]
pub async fn root() -> &'static str {
    "Welcome to my API"
}

#[instrument]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Fallback for every unmatched path.
#[instrument]
pub async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}
