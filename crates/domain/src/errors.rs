//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for WorkTracker
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum WorkTrackerError {
    #[error("Invalid team member: {0}")]
    InvalidMember(String),

    #[error("Invalid event type: {0}")]
    InvalidEventType(String),

    #[error("Malformed timestamp: {0}")]
    MalformedTimestamp(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for WorkTracker operations
pub type Result<T> = std::result::Result<T, WorkTrackerError>;
