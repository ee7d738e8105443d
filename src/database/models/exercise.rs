use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Exercise {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub muscle_group: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewExercise {
    pub user_id: Uuid,
    pub name: String,
    pub muscle_group: Option<String>,
}

/// Full replacement values for an exercise row
#[derive(Debug, Clone)]
pub struct ExerciseChanges {
    pub name: String,
    pub muscle_group: Option<String>,
}
