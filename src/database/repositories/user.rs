use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::{hash_password, verify_password};
use crate::database::manager::DatabaseError;
use crate::database::models::{NewUser, User, UserRecord};

/// Registered users. Password hashes stay inside this layer.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, DatabaseError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError>;
    /// Hashes `user.password` before storing it
    async fn create(&self, user: NewUser) -> Result<User, DatabaseError>;

    /// The user when `password` matches the stored hash for `email`
    async fn verify_password(&self, email: &str, password: &str) -> Result<Option<User>, DatabaseError> {
        let Some(record) = self.find_by_email(email).await? else {
            return Ok(None);
        };

        if verify_password(password, &record.password_hash).await? {
            Ok(Some(record.into()))
        } else {
            Ok(None)
        }
    }
}

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, DatabaseError> {
        let row = sqlx::query_as::<_, UserRecord>(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let row = sqlx::query_as::<_, User>(
            "SELECT id, name, email, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn create(&self, user: NewUser) -> Result<User, DatabaseError> {
        let password_hash = hash_password(&user.password).await?;

        let row = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, created_at
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}
