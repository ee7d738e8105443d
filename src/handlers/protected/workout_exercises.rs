// handlers/protected/workout_exercises.rs - /workouts/:id/exercises[/:exercise_id]
//
// The nested `:exercise_id` names the exercise, not the association row; the
// pair (workout, exercise) is unique.

use axum::{
    extract::{Path, State},
    Extension,
};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::api::AppState;
use crate::database::models::{NewWorkoutExercise, WorkoutExercise, WorkoutExerciseChanges};
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::handlers::utils::{conflict_as, parse_id};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::validation::{
    schemas::{CreateWorkoutExerciseInput, UpdateWorkoutExerciseInput},
    Validated,
};

const WORKOUT_NOT_FOUND: &str = "Workout not found";
const EXERCISE_NOT_FOUND: &str = "Exercise not found";
const ENTRY_NOT_FOUND: &str = "Exercise not found in this workout";
const ALREADY_ADDED: &str = "Exercise already exists in this workout";

async fn require_workout(state: &AppState, raw_id: &str, owner_id: Uuid) -> Result<Uuid, ApiError> {
    let id = parse_id(raw_id, WORKOUT_NOT_FOUND)?;
    state
        .workouts
        .find_by_id(id, owner_id)
        .await?
        .map(|workout| workout.id)
        .ok_or_else(|| ApiError::not_found(WORKOUT_NOT_FOUND))
}

async fn require_entry(
    state: &AppState,
    (workout_id, exercise_id): &(String, String),
    owner_id: Uuid,
) -> Result<WorkoutExercise, ApiError> {
    let workout_id = parse_id(workout_id, ENTRY_NOT_FOUND)?;
    let exercise_id = parse_id(exercise_id, ENTRY_NOT_FOUND)?;
    state
        .workout_exercises
        .find_by_workout_and_exercise(workout_id, exercise_id, owner_id)
        .await?
        .ok_or_else(|| ApiError::not_found(ENTRY_NOT_FOUND))
}

/// GET /workouts/:id/exercises - Exercises in the workout, in the order added
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(workout_id): Path<String>,
) -> ApiResult<Value> {
    let workout_id = require_workout(&state, &workout_id, auth.user_id).await?;
    let exercises = state
        .workout_exercises
        .list_by_workout(workout_id, auth.user_id)
        .await?;

    Ok(ApiResponse::success(json!({ "exercises": exercises })))
}

/// GET /workouts/:id/exercises/:exercise_id
pub async fn show(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(ids): Path<(String, String)>,
) -> ApiResult<Value> {
    let entry = require_entry(&state, &ids, auth.user_id).await?;
    Ok(ApiResponse::success(json!({ "workoutExercise": entry })))
}

/// POST /workouts/:id/exercises - Body `{exercise_id, weight, sets, reps}`
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(workout_id): Path<String>,
    Validated(input): Validated<CreateWorkoutExerciseInput>,
) -> ApiResult<Value> {
    let workout_id = require_workout(&state, &workout_id, auth.user_id).await?;

    if state
        .exercises
        .find_by_id(input.exercise_id, auth.user_id)
        .await?
        .is_none()
    {
        return Err(ApiError::not_found(EXERCISE_NOT_FOUND));
    }

    if state
        .workout_exercises
        .find_by_workout_and_exercise(workout_id, input.exercise_id, auth.user_id)
        .await?
        .is_some()
    {
        return Err(ApiError::conflict(ALREADY_ADDED));
    }

    let entry = state
        .workout_exercises
        .create(NewWorkoutExercise {
            workout_id,
            exercise_id: input.exercise_id,
            user_id: auth.user_id,
            weight: input.weight,
            sets: input.sets,
            reps: input.reps,
        })
        .await
        .map_err(|err| match err {
            // Parent deleted between the checks and the insert
            DatabaseError::ForeignKeyViolation(_) => ApiError::not_found(EXERCISE_NOT_FOUND),
            other => conflict_as(ALREADY_ADDED)(other),
        })?;

    info!(
        "Added exercise {} to workout {} for user {}",
        entry.exercise_id, workout_id, auth.user_id
    );
    Ok(ApiResponse::created(json!({
        "message": "Exercise added to workout successfully",
        "workoutExercise": entry,
    })))
}

/// PUT /workouts/:id/exercises/:exercise_id - Partial update of weight/sets/reps
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(ids): Path<(String, String)>,
    Validated(input): Validated<UpdateWorkoutExerciseInput>,
) -> ApiResult<Value> {
    let existing = require_entry(&state, &ids, auth.user_id).await?;

    let changes = WorkoutExerciseChanges {
        weight: input.weight.unwrap_or(existing.weight),
        sets: input.sets.unwrap_or(existing.sets),
        reps: input.reps.unwrap_or(existing.reps),
    };

    let entry = state
        .workout_exercises
        .update(existing.id, changes, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(ENTRY_NOT_FOUND))?;

    Ok(ApiResponse::success(json!({
        "message": "Workout exercise updated successfully",
        "workoutExercise": entry,
    })))
}

/// DELETE /workouts/:id/exercises/:exercise_id
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(ids): Path<(String, String)>,
) -> ApiResult<()> {
    let existing = require_entry(&state, &ids, auth.user_id).await?;

    if !state.workout_exercises.delete(existing.id, auth.user_id).await? {
        return Err(ApiError::not_found(ENTRY_NOT_FOUND));
    }

    info!(
        "Removed exercise {} from workout {} for user {}",
        existing.exercise_id, existing.workout_id, auth.user_id
    );
    Ok(ApiResponse::no_content())
}
