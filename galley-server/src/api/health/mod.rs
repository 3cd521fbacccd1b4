//! Health API

use axum::{Router, routing::get};
use serde::Serialize;

use crate::core::AppState;
use shared::error::ApiResponse;

#[derive(Debug, Serialize)]
pub struct HealthInfo {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /api/health - 健康检查 (公开)
async fn health() -> ApiResponse<HealthInfo> {
    ApiResponse::success(HealthInfo {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/health", get(health))
}
