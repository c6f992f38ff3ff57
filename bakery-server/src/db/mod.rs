//! Database Module
//!
//! Handles SQLite connection pool, migrations and first-start seeding

pub mod repository;
pub mod seed;

use crate::utils::AppError;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::str::FromStr;

/// Database service owning a SQLite connection pool
#[derive(Clone, Debug)]
pub struct DbService {
    pub pool: SqlitePool,
}

impl DbService {
    /// Open (or create) the database file with WAL mode and run migrations
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        // Build connection options: WAL, foreign keys, normal sync
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
            .map_err(|e| AppError::database(format!("Invalid database path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .pragma("foreign_keys", "ON")
            .optimize_on_close(true, None);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        // busy_timeout: 写冲突时等待 5s 而非立即失败
        sqlx::query("PRAGMA busy_timeout = 5000;")
            .execute(&pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to set busy_timeout: {e}")))?;

        tracing::info!("Database connection established (SQLite WAL, busy_timeout=5000ms)");

        Self::migrate(&pool).await?;

        Ok(Self { pool })
    }

    /// In-memory database with the full schema
    ///
    /// A single connection that is never recycled, so every query sees the
    /// same database. Used by tests and throwaway instances.
    pub async fn open_in_memory() -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| AppError::database(format!("Invalid database path: {e}")))?
            .pragma("foreign_keys", "ON");

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        Self::migrate(&pool).await?;

        Ok(Self { pool })
    }

    async fn migrate(pool: &SqlitePool) -> Result<(), AppError> {
        // Run migrations (ignore previously applied but now removed migrations)
        sqlx::migrate!("./migrations")
            .set_ignore_missing(true)
            .run(pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply migrations: {e}")))?;
        tracing::info!("Database migrations applied");
        Ok(())
    }
}
