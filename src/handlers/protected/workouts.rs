// handlers/protected/workouts.rs - /workouts and /workouts/:id

use axum::{
    extract::{Path, State},
    Extension,
};
use serde_json::{json, Value};
use tracing::info;

use crate::api::AppState;
use crate::database::models::NewWorkout;
use crate::error::ApiError;
use crate::handlers::utils::{conflict_as, parse_id};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::validation::{schemas::WorkoutInput, Validated};

const NOT_FOUND: &str = "Workout not found";
const NAME_TAKEN: &str = "Workout with this name already exists";

/// GET /workouts - Caller's workouts, newest first
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<Value> {
    let workouts = state.workouts.list(auth.user_id).await?;
    Ok(ApiResponse::success(json!({ "workouts": workouts })))
}

/// GET /workouts/:id
pub async fn show(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let id = parse_id(&id, NOT_FOUND)?;
    let workout = state
        .workouts
        .find_by_id(id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;

    Ok(ApiResponse::success(json!({ "workout": workout })))
}

/// POST /workouts - Body `{"name": string}`; names are unique per user
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Validated(input): Validated<WorkoutInput>,
) -> ApiResult<Value> {
    if state
        .workouts
        .find_by_name(&input.name, auth.user_id)
        .await?
        .is_some()
    {
        return Err(ApiError::conflict(NAME_TAKEN));
    }

    let workout = state
        .workouts
        .create(NewWorkout {
            user_id: auth.user_id,
            name: input.name,
        })
        .await
        .map_err(conflict_as(NAME_TAKEN))?;

    info!("Created workout {} for user {}", workout.id, auth.user_id);
    Ok(ApiResponse::created(json!({
        "message": "Workout created successfully",
        "workout": workout,
    })))
}

/// PUT /workouts/:id - Rename; keeping the current name is not a conflict
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    Validated(input): Validated<WorkoutInput>,
) -> ApiResult<Value> {
    let id = parse_id(&id, NOT_FOUND)?;

    if let Some(existing) = state.workouts.find_by_name(&input.name, auth.user_id).await? {
        if existing.id != id {
            return Err(ApiError::conflict(NAME_TAKEN));
        }
    }

    let workout = state
        .workouts
        .update(id, &input.name, auth.user_id)
        .await
        .map_err(conflict_as(NAME_TAKEN))?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;

    Ok(ApiResponse::success(json!({
        "message": "Workout updated successfully",
        "workout": workout,
    })))
}

/// DELETE /workouts/:id - Also removes the workout's exercise entries
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_id(&id, NOT_FOUND)?;

    if !state.workouts.delete(id, auth.user_id).await? {
        return Err(ApiError::not_found(NOT_FOUND));
    }

    info!("Deleted workout {} for user {}", id, auth.user_id);
    Ok(ApiResponse::no_content())
}
