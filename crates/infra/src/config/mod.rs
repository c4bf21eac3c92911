//! Configuration loader
//!
//! Loads application configuration from environment variables with a config
//! file fallback.
//!
//! ## Loading Strategy
//! 1. Start from the config file when one is found (TOML or JSON, detected
//!    by extension)
//! 2. Apply environment variable overrides on top
//! 3. Fall back to built-in defaults when neither source supplies a value
//!
//! ## Environment Variables
//! - `WORKTRACKER_CONFIG`: Explicit config file path
//! - `WORKTRACKER_DB_PATH`: Database file path
//! - `WORKTRACKER_DB_POOL_SIZE`: Connection pool size
//! - `WORKTRACKER_IDLE_THRESHOLD_MINUTES`: Idle threshold in minutes
//! - `WORKTRACKER_IDLE_SWEEP_INTERVAL_SECONDS`: Idle sweep interval
//! - `WORKTRACKER_SESSION_TIMEOUT_MINUTES`: App session timeout
//! - `WORKTRACKER_SESSION_SWEEP_INTERVAL_SECONDS`: Timeout sweep interval
//!
//! ## File Locations
//! Without `WORKTRACKER_CONFIG`, the loader probes `./worktracker.toml`,
//! `./worktracker.json`, `./config.toml` and `./config.json` in order.

use std::path::{Path, PathBuf};

use worktracker_domain::{Config, Result, WorkTrackerError};

const PROBE_PATHS: &[&str] =
    &["worktracker.toml", "worktracker.json", "config.toml", "config.json"];

/// Load configuration: file (if any), then environment overrides.
pub fn load() -> Result<Config> {
    let mut config = match find_config_file() {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading configuration file");
            load_from_file(&path)?
        }
        None => {
            tracing::debug!("no configuration file found, using defaults");
            Config::default()
        }
    };
    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Parse a config file by extension (`.toml` or `.json`).
pub fn load_from_file(path: &Path) -> Result<Config> {
    let raw = std::fs::read_to_string(path).map_err(|err| {
        WorkTrackerError::Config(format!("cannot read {}: {err}", path.display()))
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&raw)
            .map_err(|err| WorkTrackerError::Config(format!("invalid TOML config: {err}"))),
        Some("json") => serde_json::from_str(&raw)
            .map_err(|err| WorkTrackerError::Config(format!("invalid JSON config: {err}"))),
        other => Err(WorkTrackerError::Config(format!(
            "unsupported config extension: {other:?}"
        ))),
    }
}

fn find_config_file() -> Option<PathBuf> {
    if let Ok(explicit) = std::env::var("WORKTRACKER_CONFIG") {
        return Some(PathBuf::from(explicit));
    }
    PROBE_PATHS.iter().map(PathBuf::from).find(|path| path.is_file())
}

fn apply_env_overrides(config: &mut Config) -> Result<()> {
    if let Ok(path) = std::env::var("WORKTRACKER_DB_PATH") {
        config.database.path = path;
    }
    if let Some(pool_size) = env_parse("WORKTRACKER_DB_POOL_SIZE")? {
        config.database.pool_size = pool_size;
    }
    if let Some(threshold) = env_parse("WORKTRACKER_IDLE_THRESHOLD_MINUTES")? {
        config.tracking.idle_threshold_minutes = threshold;
    }
    if let Some(interval) = env_parse("WORKTRACKER_IDLE_SWEEP_INTERVAL_SECONDS")? {
        config.tracking.idle_sweep_interval_seconds = interval;
    }
    if let Some(timeout) = env_parse("WORKTRACKER_SESSION_TIMEOUT_MINUTES")? {
        config.tracking.session_timeout_minutes = timeout;
    }
    if let Some(interval) = env_parse("WORKTRACKER_SESSION_SWEEP_INTERVAL_SECONDS")? {
        config.tracking.session_sweep_interval_seconds = interval;
    }
    Ok(())
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Err(_) => Ok(None),
        Ok(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|err| WorkTrackerError::Config(format!("invalid {name}: {err}"))),
    }
}
