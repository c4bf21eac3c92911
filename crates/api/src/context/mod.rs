//! Application context - dependency injection container

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;
use worktracker_core::activity::ports::SampleRepository as SampleRepositoryPort;
use worktracker_core::session::ports::{
    AppSessionRepository as AppSessionRepositoryPort,
    TeamMemberRepository as TeamMemberRepositoryPort,
    WorkSessionRepository as WorkSessionRepositoryPort,
};
use worktracker_core::{
    ActivityService, AppSessionService, IdleDetectionService, SessionService,
};
use worktracker_domain::{Config, Result, Roster};
use worktracker_infra::scheduling::{IdleSweepJob, SessionTimeoutJob};
use worktracker_infra::{
    DbManager, SqliteAppSessionRepository, SqliteSampleRepository, SqliteTeamMemberRepository,
    SqliteWorkSessionRepository, SweepScheduler, SweepSchedulerConfig,
};

/// Application context - holds all services and dependencies.
pub struct AppContext {
    pub config: Config,
    pub db: Arc<DbManager>,
    pub roster: Arc<Roster>,

    // Repositories behind their ports
    pub samples: Arc<dyn SampleRepositoryPort>,
    pub members: Arc<dyn TeamMemberRepositoryPort>,
    pub work_sessions: Arc<dyn WorkSessionRepositoryPort>,
    pub app_sessions: Arc<dyn AppSessionRepositoryPort>,

    // Services
    pub activity_service: Arc<ActivityService>,
    pub session_service: Arc<SessionService>,
    pub app_session_service: Arc<AppSessionService>,
    pub idle_service: Arc<IdleDetectionService>,

    // Background sweeps
    idle_scheduler: Mutex<SweepScheduler>,
    timeout_scheduler: Mutex<SweepScheduler>,
}

impl AppContext {
    /// Wire repositories, services and schedulers from configuration.
    pub fn new(config: Config) -> Result<Self> {
        let db = Arc::new(DbManager::new(&config.database.path, config.database.pool_size)?);
        let roster = Arc::new(config.roster.clone());

        let samples: Arc<dyn SampleRepositoryPort> =
            Arc::new(SqliteSampleRepository::new(Arc::clone(&db)));
        let members: Arc<dyn TeamMemberRepositoryPort> =
            Arc::new(SqliteTeamMemberRepository::new(Arc::clone(&db)));
        let work_sessions: Arc<dyn WorkSessionRepositoryPort> =
            Arc::new(SqliteWorkSessionRepository::new(Arc::clone(&db)));
        let app_sessions: Arc<dyn AppSessionRepositoryPort> =
            Arc::new(SqliteAppSessionRepository::new(Arc::clone(&db)));

        let activity_service =
            Arc::new(ActivityService::new(Arc::clone(&samples), Arc::clone(&roster)));
        let session_service = Arc::new(SessionService::new(
            Arc::clone(&work_sessions),
            Arc::clone(&members),
            Arc::clone(&roster),
        ));
        let app_session_service =
            Arc::new(AppSessionService::new(Arc::clone(&app_sessions), Arc::clone(&roster)));
        let idle_service = Arc::new(IdleDetectionService::new(
            Arc::clone(&members),
            Arc::clone(&samples),
            config.tracking.idle_threshold_minutes,
        ));

        let idle_scheduler = Mutex::new(SweepScheduler::with_config(
            SweepSchedulerConfig::every_seconds(config.tracking.idle_sweep_interval_seconds),
            Arc::new(IdleSweepJob::new(Arc::clone(&idle_service))),
        ));
        let timeout_scheduler = Mutex::new(SweepScheduler::with_config(
            SweepSchedulerConfig::every_seconds(config.tracking.session_sweep_interval_seconds),
            Arc::new(SessionTimeoutJob::new(
                Arc::clone(&app_session_service),
                config.tracking.session_timeout_minutes,
            )),
        ));

        Ok(Self {
            config,
            db,
            roster,
            samples,
            members,
            work_sessions,
            app_sessions,
            activity_service,
            session_service,
            app_session_service,
            idle_service,
            idle_scheduler,
            timeout_scheduler,
        })
    }

    /// Start both background sweeps.
    pub async fn start_schedulers(&self) -> Result<()> {
        self.idle_scheduler.lock().await.start().await?;
        self.timeout_scheduler.lock().await.start().await?;
        info!("background sweeps started");
        Ok(())
    }

    /// Stop both background sweeps.
    pub async fn stop_schedulers(&self) -> Result<()> {
        self.idle_scheduler.lock().await.stop().await?;
        self.timeout_scheduler.lock().await.stop().await?;
        info!("background sweeps stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use worktracker_domain::{DatabaseConfig, TrackingConfig};

    use super::*;

    #[tokio::test]
    async fn context_wires_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            database: DatabaseConfig {
                path: dir.path().join("tracker.db").to_string_lossy().into_owned(),
                pool_size: 2,
            },
            tracking: TrackingConfig::default(),
            roster: Roster::default(),
        };

        let ctx = AppContext::new(config).unwrap();
        assert_eq!(ctx.roster.len(), 5);

        // The wired services share the same storage.
        let statuses = ctx.session_service.get_all_members().await.unwrap();
        assert_eq!(statuses.len(), 5);
    }
}
