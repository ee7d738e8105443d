use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewWorkout, Workout};

/// Workouts, always scoped to the owning user
#[async_trait]
pub trait WorkoutRepository: Send + Sync {
    /// Newest first
    async fn list(&self, owner_id: Uuid) -> Result<Vec<Workout>, DatabaseError>;
    async fn find_by_id(&self, id: Uuid, owner_id: Uuid) -> Result<Option<Workout>, DatabaseError>;
    async fn find_by_name(&self, name: &str, owner_id: Uuid) -> Result<Option<Workout>, DatabaseError>;
    async fn create(&self, workout: NewWorkout) -> Result<Workout, DatabaseError>;
    /// `None` when no such workout exists for the owner
    async fn update(&self, id: Uuid, name: &str, owner_id: Uuid) -> Result<Option<Workout>, DatabaseError>;
    /// `false` when nothing was deleted
    async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<bool, DatabaseError>;
}

const COLUMNS: &str = "id, user_id, name, created_at";

pub struct PgWorkoutRepository {
    pool: PgPool,
}

impl PgWorkoutRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkoutRepository for PgWorkoutRepository {
    async fn list(&self, owner_id: Uuid) -> Result<Vec<Workout>, DatabaseError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM workouts WHERE user_id = $1 ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, Workout>(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid, owner_id: Uuid) -> Result<Option<Workout>, DatabaseError> {
        let sql = format!("SELECT {COLUMNS} FROM workouts WHERE id = $1 AND user_id = $2");
        let row = sqlx::query_as::<_, Workout>(&sql)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_name(&self, name: &str, owner_id: Uuid) -> Result<Option<Workout>, DatabaseError> {
        let sql = format!("SELECT {COLUMNS} FROM workouts WHERE name = $1 AND user_id = $2");
        let row = sqlx::query_as::<_, Workout>(&sql)
            .bind(name)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, workout: NewWorkout) -> Result<Workout, DatabaseError> {
        let sql = format!(
            "INSERT INTO workouts (user_id, name) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Workout>(&sql)
            .bind(workout.user_id)
            .bind(&workout.name)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, id: Uuid, name: &str, owner_id: Uuid) -> Result<Option<Workout>, DatabaseError> {
        let sql = format!(
            "UPDATE workouts SET name = $1 WHERE id = $2 AND user_id = $3 RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Workout>(&sql)
            .bind(name)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM workouts WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
