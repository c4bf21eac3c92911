//! Production sweep jobs

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tracing::debug;
use worktracker_core::{AppSessionService, IdleDetectionService};

use super::sweep_scheduler::SweepJob;
use crate::errors::InfraError;

/// Marks working members idle when their samples go quiet.
pub struct IdleSweepJob {
    service: Arc<IdleDetectionService>,
}

impl IdleSweepJob {
    pub fn new(service: Arc<IdleDetectionService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl SweepJob for IdleSweepJob {
    fn name(&self) -> &'static str {
        "idle_sweep"
    }

    async fn run(&self) -> Result<(), InfraError> {
        let marked = self
            .service
            .sweep()
            .await
            .map_err(|err| InfraError::Internal(err.to_string()))?;
        if marked > 0 {
            debug!(marked, "idle sweep marked members idle");
        }
        Ok(())
    }
}

/// Force-closes app sessions that outlived the configured timeout.
pub struct SessionTimeoutJob {
    service: Arc<AppSessionService>,
    timeout_minutes: i64,
}

impl SessionTimeoutJob {
    pub fn new(service: Arc<AppSessionService>, timeout_minutes: i64) -> Self {
        Self { service, timeout_minutes }
    }
}

#[async_trait]
impl SweepJob for SessionTimeoutJob {
    fn name(&self) -> &'static str {
        "session_timeout"
    }

    async fn run(&self) -> Result<(), InfraError> {
        let now = Utc::now();
        let cutoff = now - Duration::minutes(self.timeout_minutes);
        self.service
            .close_timed_out(cutoff, now)
            .await
            .map_err(|err| InfraError::Internal(err.to_string()))?;
        Ok(())
    }
}
