//! Session types
//!
//! Two session granularities exist side by side:
//! - [`AppSession`]: a per-application focus bout bounded by explicit
//!   start/end/timeout events.
//! - [`WorkSession`]: a coarser per-user "currently doing qualifying work"
//!   bout used for aggregate working-time totals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Why an app session ended.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    Normal,
    Killed,
    Timeout,
    SystemShutdown,
}

impl EndReason {
    /// Stable string form used for persistence and report fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Killed => "killed",
            Self::Timeout => "timeout",
            Self::SystemShutdown => "system_shutdown",
        }
    }

    /// Case-insensitive parse of the persisted string form.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "normal" => Some(Self::Normal),
            "killed" => Some(Self::Killed),
            "timeout" => Some(Self::Timeout),
            "system_shutdown" => Some(Self::SystemShutdown),
            _ => None,
        }
    }
}

impl std::fmt::Display for EndReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session lifecycle event reported by a tracker client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEventKind {
    Start,
    End,
    Heartbeat,
}

impl SessionEventKind {
    /// Case-insensitive parse of the wire string ("start" | "end" |
    /// "heartbeat").
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "start" => Some(Self::Start),
            "end" => Some(Self::End),
            "heartbeat" => Some(Self::Heartbeat),
            _ => None,
        }
    }
}

/// Inbound session event from a tracker client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEventRequest {
    pub username: String,
    pub application_name: String,
    pub process_name: Option<String>,
    /// "start", "end" or "heartbeat"; anything else is rejected.
    pub event_type: String,
    /// Only meaningful for "end" events; defaults to "normal".
    pub end_reason: Option<String>,
}

/// A contiguous bout of focus on one application.
///
/// Invariant: at most one active session per (username, application_name)
/// pair at any time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppSession {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub username: String,
    /// Normalized application name.
    pub application_name: String,
    pub process_name: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub end_reason: Option<EndReason>,
    /// Computed when the session closes.
    pub duration_seconds: Option<i64>,
}

/// A per-user qualifying-work bout.
///
/// Invariant: at most one active session per username. Duration is wall-clock
/// minutes between login and logout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkSession {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub username: String,
    pub application_name: String,
    pub login_time: DateTime<Utc>,
    pub logout_time: Option<DateTime<Utc>>,
    pub duration_minutes: i64,
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_reason_round_trips_through_strings() {
        for reason in
            [EndReason::Normal, EndReason::Killed, EndReason::Timeout, EndReason::SystemShutdown]
        {
            assert_eq!(EndReason::parse(reason.as_str()), Some(reason));
        }
        assert_eq!(EndReason::parse("KILLED"), Some(EndReason::Killed));
        assert_eq!(EndReason::parse("crashed"), None);
    }

    #[test]
    fn event_kind_parse_is_case_insensitive() {
        assert_eq!(SessionEventKind::parse("Start"), Some(SessionEventKind::Start));
        assert_eq!(SessionEventKind::parse("HEARTBEAT"), Some(SessionEventKind::Heartbeat));
        assert_eq!(SessionEventKind::parse("pause"), None);
    }
}
