// handlers/public/auth/register.rs - POST /auth/register handler

use axum::extract::State;
use serde_json::Value;
use tracing::info;

use crate::api::AppState;
use crate::database::models::NewUser;
use crate::error::ApiError;
use crate::handlers::utils::conflict_as;
use crate::middleware::{ApiResponse, ApiResult};
use crate::validation::{schemas::RegisterInput, Validated};

use super::token_response;

const EMAIL_TAKEN: &str = "Email already registered";

/// POST /auth/register - Create an account and sign the caller in
///
/// Input: `{"name": string, "email": string, "password": string (8+ chars)}`
/// Output: 201 `{"message", "user": {id, name, email, created_at}, "token"}`
pub async fn register(
    State(state): State<AppState>,
    Validated(input): Validated<RegisterInput>,
) -> ApiResult<Value> {
    if state.users.find_by_email(&input.email).await?.is_some() {
        return Err(ApiError::conflict(EMAIL_TAKEN));
    }

    let user = state
        .users
        .create(NewUser {
            name: input.name,
            email: input.email,
            password: input.password,
        })
        .await
        .map_err(conflict_as(EMAIL_TAKEN))?;

    info!("Registered user {}", user.id);
    Ok(ApiResponse::created(token_response(
        &state,
        "User registered successfully",
        &user,
    )?))
}
