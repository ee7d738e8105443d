use std::time::Duration;

use async_trait::async_trait;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    Executor, PgPool,
};
use thiserror::Error;
use tracing::info;

use crate::auth::PasswordError;
use crate::config::DatabaseConfig;

/// Idempotent table definitions applied by `bootstrap_schema`
pub const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Errors surfaced by the persistence layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        let classified = match &err {
            sqlx::Error::Database(db_err) => {
                let constraint = db_err.constraint().unwrap_or_default().to_string();
                match db_err.code().as_deref() {
                    Some(UNIQUE_VIOLATION) => Some(DatabaseError::UniqueViolation(constraint)),
                    Some(FOREIGN_KEY_VIOLATION) => Some(DatabaseError::ForeignKeyViolation(constraint)),
                    _ => None,
                }
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Some(DatabaseError::Unavailable(err.to_string()))
            }
            _ => None,
        };

        classified.unwrap_or(DatabaseError::Sqlx(err))
    }
}

impl From<PasswordError> for DatabaseError {
    fn from(err: PasswordError) -> Self {
        DatabaseError::PasswordHash(err.to_string())
    }
}

/// Liveness check for the backing store
#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn ping(&self) -> Result<(), DatabaseError>;
}

/// Owns the PostgreSQL connection pool shared by every repository
#[derive(Clone)]
pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    /// Open the pool described by the configuration.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let options = Self::connect_options(config)?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect_with(options)
            .await?;

        info!(
            "Created database pool for: {}:{}/{}",
            config.host, config.port, config.name
        );
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions, DatabaseError> {
        if let Some(url) = &config.url {
            return url.parse::<PgConnectOptions>().map_err(DatabaseError::from);
        }

        let mut options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.name)
            .username(&config.user);
        if !config.password.is_empty() {
            options = options.password(&config.password);
        }
        Ok(options)
    }

    /// Create any missing tables. Safe to run on every start.
    pub async fn bootstrap_schema(&self) -> Result<(), DatabaseError> {
        self.pool.execute(SCHEMA_SQL).await?;
        info!("Database schema is in place");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }
}

#[async_trait]
impl StoreHealth for DatabaseManager {
    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
