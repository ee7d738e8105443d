// handlers/protected/auth.rs - GET /auth/me handler

use axum::{extract::State, Extension};
use serde_json::{json, Value};

use crate::api::AppState;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// GET /auth/me - Profile of the token holder
pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<Value> {
    let user = state
        .users
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(ApiResponse::success(json!({ "user": user })))
}
