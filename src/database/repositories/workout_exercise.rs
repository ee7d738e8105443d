use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewWorkoutExercise, WorkoutExercise, WorkoutExerciseChanges};

/// Exercise-in-workout associations. Every read is joined with the
/// exercise row for its name and muscle group.
#[async_trait]
pub trait WorkoutExerciseRepository: Send + Sync {
    /// Oldest first
    async fn list_by_workout(
        &self,
        workout_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Vec<WorkoutExercise>, DatabaseError>;

    async fn find_by_id(&self, id: Uuid, owner_id: Uuid) -> Result<Option<WorkoutExercise>, DatabaseError>;

    async fn find_by_workout_and_exercise(
        &self,
        workout_id: Uuid,
        exercise_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<WorkoutExercise>, DatabaseError>;

    async fn create(&self, association: NewWorkoutExercise) -> Result<WorkoutExercise, DatabaseError>;

    async fn update(
        &self,
        id: Uuid,
        changes: WorkoutExerciseChanges,
        owner_id: Uuid,
    ) -> Result<Option<WorkoutExercise>, DatabaseError>;

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<bool, DatabaseError>;
}

const COLUMNS: &str = r#"
        we.id,
        we.workout_id,
        we.exercise_id,
        we.user_id,
        we.weight,
        we.sets,
        we.reps,
        we.created_at,
        we.updated_at,
        e.name AS exercise_name,
        e.muscle_group
"#;

/// Joined view over `source`, aliased `we`
fn select_joined(source: &str) -> String {
    format!("SELECT {COLUMNS} FROM {source} we INNER JOIN exercises e ON we.exercise_id = e.id")
}

/// Insert and joined read in one statement
fn insert_sql() -> String {
    format!(
        r#"
        WITH written AS (
            INSERT INTO workout_exercises (workout_id, exercise_id, user_id, weight, sets, reps)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
        )
        {}
        "#,
        select_joined("written")
    )
}

/// Update and joined read in one statement
fn update_sql() -> String {
    format!(
        r#"
        WITH written AS (
            UPDATE workout_exercises
            SET weight = $1, sets = $2, reps = $3, updated_at = CURRENT_TIMESTAMP
            WHERE id = $4 AND user_id = $5
            RETURNING *
        )
        {}
        "#,
        select_joined("written")
    )
}

pub struct PgWorkoutExerciseRepository {
    pool: PgPool,
}

impl PgWorkoutExerciseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkoutExerciseRepository for PgWorkoutExerciseRepository {
    async fn list_by_workout(
        &self,
        workout_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Vec<WorkoutExercise>, DatabaseError> {
        let sql = format!(
            "{} WHERE we.workout_id = $1 AND we.user_id = $2 ORDER BY we.created_at ASC",
            select_joined("workout_exercises")
        );
        let rows = sqlx::query_as::<_, WorkoutExercise>(&sql)
            .bind(workout_id)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid, owner_id: Uuid) -> Result<Option<WorkoutExercise>, DatabaseError> {
        let sql = format!(
            "{} WHERE we.id = $1 AND we.user_id = $2",
            select_joined("workout_exercises")
        );
        let row = sqlx::query_as::<_, WorkoutExercise>(&sql)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_workout_and_exercise(
        &self,
        workout_id: Uuid,
        exercise_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<WorkoutExercise>, DatabaseError> {
        let sql = format!(
            "{} WHERE we.workout_id = $1 AND we.exercise_id = $2 AND we.user_id = $3",
            select_joined("workout_exercises")
        );
        let row = sqlx::query_as::<_, WorkoutExercise>(&sql)
            .bind(workout_id)
            .bind(exercise_id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, association: NewWorkoutExercise) -> Result<WorkoutExercise, DatabaseError> {
        let row = sqlx::query_as::<_, WorkoutExercise>(&insert_sql())
            .bind(association.workout_id)
            .bind(association.exercise_id)
            .bind(association.user_id)
            .bind(association.weight)
            .bind(association.sets)
            .bind(association.reps)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(
        &self,
        id: Uuid,
        changes: WorkoutExerciseChanges,
        owner_id: Uuid,
    ) -> Result<Option<WorkoutExercise>, DatabaseError> {
        let row = sqlx::query_as::<_, WorkoutExercise>(&update_sql())
            .bind(changes.weight)
            .bind(changes.sets)
            .bind(changes.reps)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM workout_exercises WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
