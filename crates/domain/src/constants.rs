//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

/// Each activity sample represents this many seconds of elapsed real time.
///
/// Derived minutes are always `count * SECONDS_PER_SAMPLE / 60`, a sampling
/// model rather than wall-clock deltas between samples.
pub const SECONDS_PER_SAMPLE: i64 = 30;

/// A member counts as "active" when their most recent sample is within this
/// many minutes of the evaluation instant.
pub const ACTIVE_WINDOW_MINUTES: i64 = 2;

/// Number of applications reported in the dashboard breakdown.
pub const TOP_APPLICATIONS_LIMIT: usize = 10;

/// Timezone offset bounds in minutes (UTC-14 .. UTC+14).
pub const TZ_OFFSET_MIN_MINUTES: i32 = -840;
pub const TZ_OFFSET_MAX_MINUTES: i32 = 840;

/// Window-title display truncation.
pub const MAX_TITLE_LENGTH: usize = 60;
pub const TITLE_TRUNCATE_SUFFIX: &str = "...";

/// Most recent app sessions included in a daily digest.
pub const SESSION_DIGEST_LIMIT: usize = 50;
