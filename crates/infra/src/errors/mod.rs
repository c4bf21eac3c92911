//! Infrastructure error types

use thiserror::Error;
use worktracker_domain::WorkTrackerError;

/// Errors raised by infrastructure adapters.
#[derive(Debug, Error)]
pub enum InfraError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Internal(String),
}

impl From<InfraError> for WorkTrackerError {
    fn from(err: InfraError) -> Self {
        match err {
            InfraError::Config(message) => WorkTrackerError::Config(message),
            InfraError::Internal(message) => WorkTrackerError::Internal(message),
            other => WorkTrackerError::Database(other.to_string()),
        }
    }
}
