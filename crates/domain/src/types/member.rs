//! Team member entity

use serde::{Deserialize, Serialize};

/// Roster entry with live status.
///
/// Created lazily on the first event for a roster username; never deleted.
/// `is_currently_working` and `current_application` are mutated only through
/// the session state-machine transitions and the idle sweep.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub username: String,
    pub full_name: String,
    pub total_working_minutes: i64,
    pub is_currently_working: bool,
    pub current_application: Option<String>,
}

impl TeamMember {
    /// Fresh member record in the Idle state.
    pub fn new(username: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            id: None,
            username: username.into(),
            full_name: full_name.into(),
            total_working_minutes: 0,
            is_currently_working: false,
            current_application: None,
        }
    }

    /// Transition to Working on the given (already normalized) application.
    pub fn mark_working(&mut self, application: impl Into<String>) {
        self.is_currently_working = true;
        self.current_application = Some(application.into());
    }

    /// Transition to Idle.
    pub fn mark_idle(&mut self) {
        self.is_currently_working = false;
        self.current_application = None;
    }
}
