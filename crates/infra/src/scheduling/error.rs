//! Scheduler error types

use thiserror::Error;
use worktracker_domain::WorkTrackerError;

use crate::errors::InfraError;

/// Scheduler-specific errors
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("scheduler already running")]
    AlreadyRunning,

    #[error("scheduler not running")]
    NotRunning,

    #[error("failed to create scheduler: {0}")]
    CreationFailed(String),

    #[error("failed to start scheduler: {0}")]
    StartFailed(String),

    #[error("failed to stop scheduler: {0}")]
    StopFailed(String),

    #[error("failed to register job: {0}")]
    JobRegistrationFailed(String),

    #[error("operation timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("task join failed: {0}")]
    TaskJoinFailed(String),
}

pub type SchedulerResult<T> = Result<T, SchedulerError>;

impl From<SchedulerError> for InfraError {
    fn from(err: SchedulerError) -> Self {
        InfraError::Internal(err.to_string())
    }
}

impl From<SchedulerError> for WorkTrackerError {
    fn from(err: SchedulerError) -> Self {
        match err {
            SchedulerError::AlreadyRunning | SchedulerError::NotRunning => {
                WorkTrackerError::InvalidInput(err.to_string())
            }
            other => WorkTrackerError::Internal(other.to_string()),
        }
    }
}
