use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::database::session::DbSession;

/// Errors from the storage layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Satellite {0} not found")]
    SatelliteNotFound(i64),

    #[error("Invalid database URL: {0}")]
    InvalidUrl(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

const CREATE_SATELLITES: &str = r#"
    CREATE TABLE IF NOT EXISTS satellites (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        acronym TEXT NOT NULL,
        mass REAL NOT NULL,
        power REAL NOT NULL
    )
"#;

const CREATE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        username TEXT PRIMARY KEY NOT NULL,
        hashed_password TEXT NOT NULL
    )
"#;

/// Owner of the process-wide SQLite connection pool.
///
/// Constructed once at startup and handed to handlers through `AppState`.
/// Cloning shares the underlying pool.
#[derive(Clone, Debug)]
pub struct DatabaseManager {
    pool: SqlitePool,
}

impl DatabaseManager {
    /// Open the pool described by `config`, creating the database file if missing
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| DatabaseError::InvalidUrl(e.to_string()))?
            .create_if_missing(true)
            .busy_timeout(Duration::from_millis(config.busy_timeout_ms));

        let mut pool_options = SqlitePoolOptions::new()
            .acquire_timeout(Duration::from_secs(config.connection_timeout));

        // An in-memory database lives only as long as its connection, so the
        // pool is pinned to a single connection that is never recycled.
        if Self::is_in_memory(&config.url) {
            pool_options = pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        } else {
            pool_options = pool_options.max_connections(config.max_connections);
        }

        let pool = pool_options.connect_with(options).await?;

        info!("Opened database pool for: {}", config.url);
        Ok(Self { pool })
    }

    /// Create the satellites and users tables if they do not exist yet
    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        sqlx::query(CREATE_SATELLITES).execute(&self.pool).await?;
        sqlx::query(CREATE_USERS).execute(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Start a scoped session. Dropping it without `commit` rolls back.
    pub async fn begin(&self) -> Result<DbSession, DatabaseError> {
        let tx = self.pool.begin().await?;
        Ok(DbSession::new(tx))
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Close the pool (e.g., on shutdown)
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }

    fn is_in_memory(url: &str) -> bool {
        url.contains(":memory:") || url.contains("mode=memory")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_config() -> DatabaseConfig {
        DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 5,
            connection_timeout: 5,
            busy_timeout_ms: 1000,
        }
    }

    #[test]
    fn detects_in_memory_urls() {
        assert!(DatabaseManager::is_in_memory("sqlite::memory:"));
        assert!(DatabaseManager::is_in_memory("sqlite://file?mode=memory"));
        assert!(!DatabaseManager::is_in_memory("sqlite://satellites.db"));
    }

    #[tokio::test]
    async fn migrate_is_idempotent() {
        let db = DatabaseManager::connect(&memory_config()).await.unwrap();
        db.migrate().await.unwrap();
        db.migrate().await.unwrap();
        db.health_check().await.unwrap();
    }

    #[tokio::test]
    async fn rejects_malformed_url() {
        let mut config = memory_config();
        config.url = "sqlite://satellites.db?mode=bogus".to_string();
        let err = DatabaseManager::connect(&config).await.unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidUrl(_)));
    }
}
