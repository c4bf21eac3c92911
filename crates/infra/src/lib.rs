//! # WorkTracker Infrastructure
//!
//! Adapters behind the core ports: SQLite persistence, configuration
//! loading and cron-based background sweeps.
//!
//! ## Architecture Principles
//! - Implements the repository traits defined in `worktracker-core`
//! - All blocking database work runs on the blocking thread pool
//! - Schedulers own their lifecycle: explicit start/stop, cancellation token,
//!   bounded timeouts

pub mod config;
pub mod database;
pub mod errors;
pub mod scheduling;

pub use database::{
    DbManager, SqliteAppSessionRepository, SqliteSampleRepository, SqliteTeamMemberRepository,
    SqliteWorkSessionRepository,
};
pub use errors::InfraError;
pub use scheduling::{SweepJob, SweepScheduler, SweepSchedulerConfig};
