//! Cron-based sweep scheduler
//!
//! Runs one [`SweepJob`] on a cron schedule with explicit lifecycle
//! management: join handles are tracked, cancellation is explicit, and every
//! asynchronous operation is wrapped in a timeout. One scheduler instance is
//! created per job; both the idle sweep and the app-session timeout sweep use
//! this type.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio_cron_scheduler::{Job, JobScheduler};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use crate::errors::InfraError;
use crate::scheduling::error::{SchedulerError, SchedulerResult};

/// A periodic sweep executed by the scheduler.
#[async_trait]
pub trait SweepJob: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Execute one sweep.
    async fn run(&self) -> Result<(), InfraError>;
}

/// Scheduler configuration.
#[derive(Debug, Clone)]
pub struct SweepSchedulerConfig {
    /// Cron expression describing the execution schedule.
    pub cron_expression: String,
    /// Timeout applied to a single sweep execution.
    pub job_timeout: Duration,
    /// Timeout for starting the underlying scheduler.
    pub start_timeout: Duration,
    /// Timeout for stopping the scheduler.
    pub stop_timeout: Duration,
    /// Timeout for awaiting the monitor task join handle.
    pub join_timeout: Duration,
}

impl Default for SweepSchedulerConfig {
    fn default() -> Self {
        Self {
            cron_expression: "0 * * * * *".into(), // every minute
            job_timeout: Duration::from_secs(60),
            start_timeout: Duration::from_secs(5),
            stop_timeout: Duration::from_secs(5),
            join_timeout: Duration::from_secs(5),
        }
    }
}

impl SweepSchedulerConfig {
    /// Config running every `interval_seconds` seconds.
    ///
    /// Intervals that do not divide a minute evenly fall back to an
    /// every-N-seconds cron expression.
    pub fn every_seconds(interval_seconds: u64) -> Self {
        let interval = interval_seconds.clamp(1, 59 * 60);
        let cron_expression = if interval % 60 == 0 {
            format!("0 */{} * * * *", interval / 60)
        } else {
            format!("*/{interval} * * * * *")
        };
        Self { cron_expression, ..Default::default() }
    }
}

/// Sweep scheduler with explicit lifecycle management.
pub struct SweepScheduler {
    scheduler: Arc<RwLock<Option<JobScheduler>>>,
    config: SweepSchedulerConfig,
    monitor_handle: Option<JoinHandle<()>>,
    cancellation: CancellationToken,
    job: Arc<dyn SweepJob>,
}

impl SweepScheduler {
    /// Create a scheduler for one job with a custom configuration.
    pub fn with_config(config: SweepSchedulerConfig, job: Arc<dyn SweepJob>) -> Self {
        Self {
            scheduler: Arc::new(RwLock::new(None)),
            config,
            monitor_handle: None,
            cancellation: CancellationToken::new(),
            job,
        }
    }

    /// Start the scheduler, spawning the monitoring task.
    #[instrument(skip(self), fields(job = self.job.name()))]
    pub async fn start(&mut self) -> SchedulerResult<()> {
        if self.is_running() {
            return Err(SchedulerError::AlreadyRunning);
        }

        self.cancellation = CancellationToken::new();

        let scheduler_instance = self.build_scheduler().await?;
        let start_timeout = self.config.start_timeout;

        tokio::time::timeout(start_timeout, scheduler_instance.start())
            .await
            .map_err(|_| SchedulerError::Timeout { seconds: start_timeout.as_secs() })?
            .map_err(|source| SchedulerError::StartFailed(source.to_string()))?;

        {
            let mut guard = self.scheduler.write().await;
            *guard = Some(scheduler_instance);
        }

        let cancel = self.cancellation.clone();
        let name = self.job.name();
        let handle = tokio::spawn(async move {
            cancel.cancelled().await;
            debug!(job = name, "sweep scheduler monitor cancelled");
        });

        self.monitor_handle = Some(handle);
        info!(job = self.job.name(), cron = %self.config.cron_expression, "sweep scheduler started");
        Ok(())
    }

    /// Stop the scheduler and wait for the monitor task to finish.
    #[instrument(skip(self), fields(job = self.job.name()))]
    pub async fn stop(&mut self) -> SchedulerResult<()> {
        if !self.is_running() {
            return Err(SchedulerError::NotRunning);
        }

        self.cancellation.cancel();

        let scheduler = {
            let mut guard = self.scheduler.write().await;
            guard.take()
        };
        let Some(mut scheduler) = scheduler else {
            return Err(SchedulerError::NotRunning);
        };

        let stop_timeout = self.config.stop_timeout;
        tokio::time::timeout(stop_timeout, scheduler.shutdown())
            .await
            .map_err(|_| SchedulerError::Timeout { seconds: stop_timeout.as_secs() })?
            .map_err(|source| SchedulerError::StopFailed(source.to_string()))?;

        if let Some(handle) = self.monitor_handle.take() {
            let join_timeout = self.config.join_timeout;
            tokio::time::timeout(join_timeout, handle)
                .await
                .map_err(|_| SchedulerError::Timeout { seconds: join_timeout.as_secs() })?
                .map_err(|err| SchedulerError::TaskJoinFailed(err.to_string()))?;
        }

        info!(job = self.job.name(), "sweep scheduler stopped");
        Ok(())
    }

    /// Returns true when the monitor task is active.
    pub fn is_running(&self) -> bool {
        self.monitor_handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    async fn build_scheduler(&self) -> SchedulerResult<JobScheduler> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|source| SchedulerError::CreationFailed(source.to_string()))?;

        let job = Arc::clone(&self.job);
        let job_timeout = self.config.job_timeout;

        let job_definition = Job::new_async(self.config.cron_expression.as_str(), move |_id, _lock| {
            let job = Arc::clone(&job);
            Box::pin(async move {
                match tokio::time::timeout(job_timeout, job.run()).await {
                    Ok(Ok(())) => debug!(job = job.name(), "sweep finished"),
                    Ok(Err(err)) => error!(job = job.name(), error = %err, "sweep failed"),
                    Err(_) => {
                        warn!(job = job.name(), timeout_secs = job_timeout.as_secs(), "sweep timed out");
                    }
                }
            })
        })
        .map_err(|source| SchedulerError::JobRegistrationFailed(source.to_string()))?;

        scheduler
            .add(job_definition)
            .await
            .map_err(|source| SchedulerError::JobRegistrationFailed(source.to_string()))?;

        debug!(job = self.job.name(), cron = %self.config.cron_expression, "registered sweep job");
        Ok(scheduler)
    }
}

impl Drop for SweepScheduler {
    fn drop(&mut self) {
        if self.is_running() {
            warn!(job = self.job.name(), "SweepScheduler dropped while running; cancelling tasks");
            self.cancellation.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct CountingSweepJob {
        runs: AtomicUsize,
    }

    impl CountingSweepJob {
        fn new() -> Self {
            Self { runs: AtomicUsize::new(0) }
        }

        fn run_count(&self) -> usize {
            self.runs.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SweepJob for CountingSweepJob {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn run(&self) -> Result<(), InfraError> {
            self.runs.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct FailingSweepJob;

    #[async_trait]
    impl SweepJob for FailingSweepJob {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn run(&self) -> Result<(), InfraError> {
            Err(InfraError::Internal("sweep failure".into()))
        }
    }

    fn fast_config() -> SweepSchedulerConfig {
        SweepSchedulerConfig {
            cron_expression: "*/1 * * * * *".into(), // every second
            job_timeout: Duration::from_secs(2),
            start_timeout: Duration::from_secs(2),
            stop_timeout: Duration::from_secs(2),
            join_timeout: Duration::from_secs(2),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn lifecycle_runs_the_job() {
        let job = Arc::new(CountingSweepJob::new());
        let mut scheduler = SweepScheduler::with_config(fast_config(), job.clone());

        scheduler.start().await.expect("start succeeds");
        tokio::time::sleep(Duration::from_secs(2)).await;
        scheduler.stop().await.expect("stop succeeds");

        assert!(job.run_count() >= 1);
        assert!(!scheduler.is_running());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn job_errors_keep_the_scheduler_running() {
        let mut scheduler = SweepScheduler::with_config(fast_config(), Arc::new(FailingSweepJob));

        scheduler.start().await.expect("start succeeds");
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(scheduler.is_running());
        scheduler.stop().await.expect("stop succeeds");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn double_start_is_rejected() {
        let mut scheduler =
            SweepScheduler::with_config(fast_config(), Arc::new(CountingSweepJob::new()));

        scheduler.start().await.expect("first start");
        let err = scheduler.start().await.expect_err("second start fails");
        assert!(matches!(err, SchedulerError::AlreadyRunning));
        scheduler.stop().await.expect("stop succeeds");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn restart_after_stop_succeeds() {
        let mut scheduler =
            SweepScheduler::with_config(fast_config(), Arc::new(CountingSweepJob::new()));

        scheduler.start().await.expect("start succeeds");
        scheduler.stop().await.expect("stop succeeds");
        assert!(!scheduler.is_running());

        scheduler.start().await.expect("start again");
        scheduler.stop().await.expect("stop again");
    }

    #[test]
    fn interval_config_builds_cron_expressions() {
        assert_eq!(SweepSchedulerConfig::every_seconds(60).cron_expression, "0 */1 * * * *");
        assert_eq!(SweepSchedulerConfig::every_seconds(600).cron_expression, "0 */10 * * * *");
        assert_eq!(SweepSchedulerConfig::every_seconds(30).cron_expression, "*/30 * * * * *");
    }
}
