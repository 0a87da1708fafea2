use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("database.connection_error")]
    ConnectionError,
    #[error("database.initialization_error")]
    InitializationError,
}

const IN_MEMORY_URL: &str = "sqlite::memory:";

/// Configuration for the database connection
pub struct DatabaseConfig {
    pub connection_string: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    /// Creates a new database configuration with default values
    pub fn new(connection_string: String) -> Self {
        Self {
            connection_string,
            max_connections: 5,
            acquire_timeout: Duration::from_secs(30),
        }
    }

    /// A private in-memory database. Every pooled connection would see its own
    /// empty database, so the pool is pinned to a single long-lived connection.
    pub fn in_memory() -> Self {
        Self {
            connection_string: IN_MEMORY_URL.to_string(),
            max_connections: 1,
            acquire_timeout: Duration::from_secs(30),
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.connection_string.contains(":memory:") || self.connection_string.contains("mode=memory")
    }
}

/// Creates a SQLite connection pool
pub async fn create_sqlite_pool(config: &DatabaseConfig) -> Result<SqlitePool, DatabaseError> {
    let mut options = SqlitePoolOptions::new()
        .max_connections(config.max_connections.max(1))
        .acquire_timeout(config.acquire_timeout);

    if config.is_in_memory() {
        options = options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }

    let pool = options
        .connect(&config.connection_string)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to open sqlite pool");
            DatabaseError::ConnectionError
        })?;

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_detect_in_memory_urls() {
        assert!(DatabaseConfig::in_memory().is_in_memory());
        assert!(DatabaseConfig::new("sqlite:file:catalog?mode=memory&cache=shared".into()).is_in_memory());
        assert!(!DatabaseConfig::new("sqlite://catalog.db?mode=rwc".into()).is_in_memory());
    }

    #[tokio::test]
    async fn should_open_in_memory_pool() {
        let pool = create_sqlite_pool(&DatabaseConfig::in_memory()).await.unwrap();

        let (one,): (i64,) = sqlx::query_as("SELECT 1").fetch_one(&pool).await.unwrap();

        assert_eq!(one, 1);
        pool.close().await;
    }
}
