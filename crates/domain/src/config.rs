//! Configuration management

use serde::{Deserialize, Serialize};

use crate::roster::Roster;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub tracking: TrackingConfig,
    #[serde(default)]
    pub roster: Roster,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    pub pool_size: u32,
}

/// Activity tracking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// Minutes of sample inactivity after which a working member is idled.
    pub idle_threshold_minutes: i64,
    /// Interval between idle sweeps, in seconds.
    pub idle_sweep_interval_seconds: u64,
    /// Active app sessions older than this are force-closed with
    /// `end_reason = timeout`.
    pub session_timeout_minutes: i64,
    /// Interval between app-session timeout sweeps, in seconds.
    pub session_sweep_interval_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig { path: "worktracker.db".to_string(), pool_size: 8 },
            tracking: TrackingConfig::default(),
            roster: Roster::default(),
        }
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            idle_threshold_minutes: 5,
            idle_sweep_interval_seconds: 60,
            session_timeout_minutes: 720,
            session_sweep_interval_seconds: 600,
        }
    }
}
