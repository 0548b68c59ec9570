//! Health check handler.

use axum::Json;
use axum::extract::State;

use coursehub_core::traits::cache::CacheProvider;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let database = match state.db.health_check().await {
        Ok(true) => "connected",
        Ok(false) | Err(_) => "unavailable",
    };
    let cache = match state.cache.health_check().await {
        Ok(true) => "connected",
        Ok(false) | Err(_) => "unavailable",
    };
    let status = if database == "connected" && cache == "connected" {
        "ok"
    } else {
        "degraded"
    };

    Json(ApiResponse::ok(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        database: database.to_string(),
        cache: cache.to_string(),
        timestamp: chrono::Utc::now(),
    }))
}
