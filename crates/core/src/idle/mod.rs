//! Idle detection sweep
//!
//! Members report activity every 30 seconds; a member in the Working state
//! with no sample for the configured threshold is swept back to Idle. The
//! sweep is idempotent and evaluates every member against one consistent
//! instant.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{error, info};
use worktracker_domain::Result;

use crate::activity::ports::SampleRepository;
use crate::session::ports::TeamMemberRepository;

pub struct IdleDetectionService {
    members: Arc<dyn TeamMemberRepository>,
    samples: Arc<dyn SampleRepository>,
    idle_threshold_minutes: i64,
}

impl IdleDetectionService {
    pub fn new(
        members: Arc<dyn TeamMemberRepository>,
        samples: Arc<dyn SampleRepository>,
        idle_threshold_minutes: i64,
    ) -> Self {
        Self { members, samples, idle_threshold_minutes }
    }

    /// Sweep using the current time. Returns how many members were marked
    /// idle.
    pub async fn sweep(&self) -> Result<usize> {
        self.sweep_at(Utc::now()).await
    }

    /// Sweep every Working member against one consistent `now`.
    ///
    /// A failure for one member is logged and does not stop the sweep; the
    /// remaining members are still evaluated.
    pub async fn sweep_at(&self, now: DateTime<Utc>) -> Result<usize> {
        let threshold = now - Duration::minutes(self.idle_threshold_minutes);
        // The window extends slightly past `now` to tolerate client clocks
        // running marginally ahead.
        let window_end = now + Duration::minutes(1);

        let working = self.members.find_working().await?;
        let mut marked_idle = 0;

        for mut member in working {
            let recent = match self.samples.find_samples(&member.username, threshold, window_end).await
            {
                Ok(samples) => samples,
                Err(err) => {
                    error!(username = %member.username, error = %err, "idle sweep lookup failed");
                    continue;
                }
            };
            if !recent.is_empty() {
                continue;
            }

            info!(
                username = %member.username,
                threshold_minutes = self.idle_threshold_minutes,
                "marking member idle, no recent activity"
            );
            member.mark_idle();
            match self.members.save(&member).await {
                Ok(_) => marked_idle += 1,
                Err(err) => {
                    error!(username = %member.username, error = %err, "idle sweep save failed");
                }
            }
        }

        Ok(marked_idle)
    }
}
