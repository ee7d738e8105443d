use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An exercise performed in a workout, enriched with the exercise's
/// name and muscle group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct WorkoutExercise {
    pub id: Uuid,
    pub workout_id: Uuid,
    pub exercise_id: Uuid,
    pub user_id: Uuid,
    pub weight: f64,
    pub sets: i32,
    pub reps: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub exercise_name: String,
    pub muscle_group: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewWorkoutExercise {
    pub workout_id: Uuid,
    pub exercise_id: Uuid,
    pub user_id: Uuid,
    pub weight: f64,
    pub sets: i32,
    pub reps: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkoutExerciseChanges {
    pub weight: f64,
    pub sets: i32,
    pub reps: i32,
}
