use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::error::{api_success, ApiError, ApiResponse};
use crate::server::RehabDeskServer;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

/// Version information response
#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub name: String,
    pub version: String,
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy"),
    )
)]
pub async fn health_check(
    State(_server): State<RehabDeskServer>,
) -> Result<Json<ApiResponse<HealthResponse>>, ApiError> {
    Ok(Json(api_success(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })))
}

/// Build version info
#[utoipa::path(
    get,
    path = "/version",
    tag = "Health",
    responses(
        (status = 200, description = "Version information"),
    )
)]
pub async fn version_info() -> Result<Json<ApiResponse<VersionResponse>>, ApiError> {
    Ok(Json(api_success(VersionResponse {
        name: "RehabDesk Engine".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })))
}
