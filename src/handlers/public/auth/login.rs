// handlers/public/auth/login.rs - POST /auth/login handler

use axum::extract::State;
use serde_json::Value;
use tracing::info;

use crate::api::AppState;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::validation::{schemas::LoginInput, Validated};

use super::token_response;

/// POST /auth/login - Exchange credentials for a bearer token
///
/// Unknown email and wrong password produce the same 401 so the response
/// does not reveal which accounts exist.
pub async fn login(
    State(state): State<AppState>,
    Validated(input): Validated<LoginInput>,
) -> ApiResult<Value> {
    let user = state
        .users
        .verify_password(&input.email, &input.password)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    info!("User {} logged in", user.id);
    Ok(ApiResponse::success(token_response(&state, "Login successful", &user)?))
}
