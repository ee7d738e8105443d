// handlers/protected/exercises.rs - /exercises and /exercises/:id

use axum::{
    extract::{Path, State},
    Extension,
};
use serde_json::{json, Value};
use tracing::info;

use crate::api::AppState;
use crate::database::models::{ExerciseChanges, NewExercise};
use crate::error::ApiError;
use crate::handlers::utils::{conflict_as, parse_id};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::validation::{
    schemas::{CreateExerciseInput, UpdateExerciseInput},
    Validated,
};

const NOT_FOUND: &str = "Exercise not found";
const NAME_TAKEN: &str = "Exercise with this name already exists";

/// GET /exercises - Caller's exercise catalogue, by name
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<Value> {
    let exercises = state.exercises.list(auth.user_id).await?;
    Ok(ApiResponse::success(json!({ "exercises": exercises })))
}

/// GET /exercises/:id
pub async fn show(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let id = parse_id(&id, NOT_FOUND)?;
    let exercise = state
        .exercises
        .find_by_id(id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;

    Ok(ApiResponse::success(json!({ "exercise": exercise })))
}

/// POST /exercises - Body `{"name": string, "muscle_group"?: string}`
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Validated(input): Validated<CreateExerciseInput>,
) -> ApiResult<Value> {
    if state
        .exercises
        .find_by_name(&input.name, auth.user_id)
        .await?
        .is_some()
    {
        return Err(ApiError::conflict(NAME_TAKEN));
    }

    let exercise = state
        .exercises
        .create(NewExercise {
            user_id: auth.user_id,
            name: input.name,
            muscle_group: input.muscle_group,
        })
        .await
        .map_err(conflict_as(NAME_TAKEN))?;

    info!("Created exercise {} for user {}", exercise.id, auth.user_id);
    Ok(ApiResponse::created(json!({
        "message": "Exercise created successfully",
        "exercise": exercise,
    })))
}

/// PUT /exercises/:id - Replace the name; `muscle_group` is kept when absent
/// and cleared when null
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    Validated(input): Validated<UpdateExerciseInput>,
) -> ApiResult<Value> {
    let id = parse_id(&id, NOT_FOUND)?;

    if let Some(existing) = state.exercises.find_by_name(&input.name, auth.user_id).await? {
        if existing.id != id {
            return Err(ApiError::conflict(NAME_TAKEN));
        }
    }

    let current = state
        .exercises
        .find_by_id(id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;

    let changes = ExerciseChanges {
        name: input.name,
        muscle_group: input.muscle_group.unwrap_or(current.muscle_group),
    };

    let exercise = state
        .exercises
        .update(id, changes, auth.user_id)
        .await
        .map_err(conflict_as(NAME_TAKEN))?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;

    Ok(ApiResponse::success(json!({
        "message": "Exercise updated successfully",
        "exercise": exercise,
    })))
}

/// DELETE /exercises/:id - Also removes it from every workout
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_id(&id, NOT_FOUND)?;

    if !state.exercises.delete(id, auth.user_id).await? {
        return Err(ApiError::not_found(NOT_FOUND));
    }

    info!("Deleted exercise {} for user {}", id, auth.user_id);
    Ok(ApiResponse::no_content())
}
