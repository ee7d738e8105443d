// handlers/public/health.rs - GET / and GET /health

use axum::extract::State;
use serde_json::{json, Value};
use tracing::warn;

use crate::api::AppState;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

/// GET / - Service description
pub async fn root() -> ApiResult<Value> {
    Ok(ApiResponse::success(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "auth": ["/auth/register", "/auth/login", "/auth/me"],
            "workouts": ["/workouts", "/workouts/:id", "/workouts/:id/exercises"],
            "exercises": ["/exercises", "/exercises/:id"],
        },
    })))
}

/// GET /health - 200 while the store answers, 503 otherwise
pub async fn health(State(state): State<AppState>) -> ApiResult<Value> {
    state.health.ping().await.map_err(|e| {
        warn!("Health check failed: {}", e);
        ApiError::service_unavailable("Database unavailable")
    })?;

    Ok(ApiResponse::success(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
        "database": "ok",
    })))
}
