use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Exercise, ExerciseChanges, NewExercise};

/// Exercises, always scoped to the owning user
#[async_trait]
pub trait ExerciseRepository: Send + Sync {
    /// Alphabetical by name
    async fn list(&self, owner_id: Uuid) -> Result<Vec<Exercise>, DatabaseError>;
    async fn find_by_id(&self, id: Uuid, owner_id: Uuid) -> Result<Option<Exercise>, DatabaseError>;
    async fn find_by_name(&self, name: &str, owner_id: Uuid) -> Result<Option<Exercise>, DatabaseError>;
    async fn create(&self, exercise: NewExercise) -> Result<Exercise, DatabaseError>;
    async fn update(
        &self,
        id: Uuid,
        changes: ExerciseChanges,
        owner_id: Uuid,
    ) -> Result<Option<Exercise>, DatabaseError>;
    async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<bool, DatabaseError>;
}

const COLUMNS: &str = "id, user_id, name, muscle_group, created_at";

pub struct PgExerciseRepository {
    pool: PgPool,
}

impl PgExerciseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExerciseRepository for PgExerciseRepository {
    async fn list(&self, owner_id: Uuid) -> Result<Vec<Exercise>, DatabaseError> {
        let sql = format!("SELECT {COLUMNS} FROM exercises WHERE user_id = $1 ORDER BY name ASC");
        let rows = sqlx::query_as::<_, Exercise>(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid, owner_id: Uuid) -> Result<Option<Exercise>, DatabaseError> {
        let sql = format!("SELECT {COLUMNS} FROM exercises WHERE id = $1 AND user_id = $2");
        let row = sqlx::query_as::<_, Exercise>(&sql)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_name(&self, name: &str, owner_id: Uuid) -> Result<Option<Exercise>, DatabaseError> {
        let sql = format!("SELECT {COLUMNS} FROM exercises WHERE name = $1 AND user_id = $2");
        let row = sqlx::query_as::<_, Exercise>(&sql)
            .bind(name)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, exercise: NewExercise) -> Result<Exercise, DatabaseError> {
        let sql = format!(
            "INSERT INTO exercises (user_id, name, muscle_group) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Exercise>(&sql)
            .bind(exercise.user_id)
            .bind(&exercise.name)
            .bind(&exercise.muscle_group)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(
        &self,
        id: Uuid,
        changes: ExerciseChanges,
        owner_id: Uuid,
    ) -> Result<Option<Exercise>, DatabaseError> {
        let sql = format!(
            "UPDATE exercises SET name = $1, muscle_group = $2
             WHERE id = $3 AND user_id = $4
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Exercise>(&sql)
            .bind(&changes.name)
            .bind(&changes.muscle_group)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM exercises WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
