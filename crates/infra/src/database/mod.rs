//! SQLite persistence adapters
//!
//! One repository per aggregate, all sharing the pooled connection manager.
//! Timestamps are stored as unix seconds; booleans as 0/1 integers.

mod app_session_repository;
mod manager;
mod member_repository;
mod sample_repository;
mod work_session_repository;

pub use app_session_repository::SqliteAppSessionRepository;
pub use manager::DbManager;
pub use member_repository::SqliteTeamMemberRepository;
pub use sample_repository::SqliteSampleRepository;
pub use work_session_repository::SqliteWorkSessionRepository;

use chrono::{DateTime, Utc};
use worktracker_domain::WorkTrackerError;

/// Convert a stored unix-second timestamp back to UTC.
pub(crate) fn timestamp_from_unix(seconds: i64) -> Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::from_timestamp(seconds, 0).ok_or_else(|| {
        rusqlite::Error::IntegralValueOutOfRange(0, seconds)
    })
}

pub(crate) fn map_sql_error(err: rusqlite::Error) -> WorkTrackerError {
    WorkTrackerError::Database(err.to_string())
}

pub(crate) fn map_join_error(err: tokio::task::JoinError) -> WorkTrackerError {
    WorkTrackerError::Database(format!("blocking task failed: {err}"))
}
