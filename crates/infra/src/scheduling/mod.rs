//! Background sweep scheduling
//!
//! Cron-driven sweeps with explicit lifecycle management. Two jobs run in
//! production: the idle-detection sweep and the app-session timeout sweep,
//! both built on the same [`SweepScheduler`].

pub mod error;
pub mod jobs;
mod sweep_scheduler;

pub use error::{SchedulerError, SchedulerResult};
pub use jobs::{IdleSweepJob, SessionTimeoutJob};
pub use sweep_scheduler::{SweepJob, SweepScheduler, SweepSchedulerConfig};
