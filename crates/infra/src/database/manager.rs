//! Pooled SQLite connection manager

use std::path::Path;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use tracing::info;

use crate::errors::InfraError;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS activity_samples (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL,
    application_name TEXT,
    window_title TEXT,
    timestamp INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_samples_user_time
    ON activity_samples (username, timestamp);

CREATE TABLE IF NOT EXISTS team_members (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    full_name TEXT NOT NULL,
    total_working_minutes INTEGER NOT NULL DEFAULT 0,
    is_currently_working INTEGER NOT NULL DEFAULT 0,
    current_application TEXT
);

CREATE TABLE IF NOT EXISTS work_sessions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL,
    application_name TEXT NOT NULL,
    login_time INTEGER NOT NULL,
    logout_time INTEGER,
    duration_minutes INTEGER NOT NULL DEFAULT 0,
    is_active INTEGER NOT NULL DEFAULT 0
);
CREATE INDEX IF NOT EXISTS idx_work_sessions_user_active
    ON work_sessions (username, is_active);

CREATE TABLE IF NOT EXISTS app_sessions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL,
    application_name TEXT NOT NULL,
    process_name TEXT,
    start_time INTEGER NOT NULL,
    end_time INTEGER,
    is_active INTEGER NOT NULL DEFAULT 0,
    end_reason TEXT,
    duration_seconds INTEGER
);
CREATE INDEX IF NOT EXISTS idx_app_sessions_user_app_active
    ON app_sessions (username, application_name, is_active);
CREATE INDEX IF NOT EXISTS idx_app_sessions_user_start
    ON app_sessions (username, start_time);
";

/// Shared connection pool plus schema management.
pub struct DbManager {
    pool: Pool<SqliteConnectionManager>,
}

impl DbManager {
    /// Open (or create) the database at `path` and run migrations.
    pub fn new(path: impl AsRef<Path>, pool_size: u32) -> Result<Self, InfraError> {
        let manager = SqliteConnectionManager::file(path.as_ref()).with_init(|conn| {
            conn.execute_batch("PRAGMA journal_mode = WAL; PRAGMA foreign_keys = ON;")
        });
        let pool = Pool::builder().max_size(pool_size).build(manager)?;

        let db = Self { pool };
        db.run_migrations()?;
        info!(path = %path.as_ref().display(), pool_size, "database ready");
        Ok(db)
    }

    /// Borrow a pooled connection.
    pub fn get_connection(
        &self,
    ) -> Result<PooledConnection<SqliteConnectionManager>, InfraError> {
        Ok(self.pool.get()?)
    }

    fn run_migrations(&self) -> Result<(), InfraError> {
        let conn = self.get_connection()?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }
}
