//! Fixed team roster
//!
//! The set of valid member usernames is supplied by configuration, not
//! discovered at runtime. Components receive the roster at construction so
//! tests can substitute a different member set.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Immutable roster of trackable team members.
///
/// Usernames are stored lowercase; lookups are case-insensitive. The roster
/// also carries the "qualifying work application" keyword set used by the
/// work-session heartbeat path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roster {
    members: BTreeMap<String, String>,
    work_apps: Vec<String>,
}

impl Roster {
    /// Build a roster from `(username, full name)` pairs and a qualifying
    /// work-application keyword set.
    pub fn new<M, W>(members: M, work_apps: W) -> Self
    where
        M: IntoIterator<Item = (String, String)>,
        W: IntoIterator<Item = String>,
    {
        Self {
            members: members
                .into_iter()
                .map(|(username, full_name)| (username.to_lowercase(), full_name))
                .collect(),
            work_apps: work_apps.into_iter().map(|app| app.to_lowercase()).collect(),
        }
    }

    /// True when the username belongs to the roster (case-insensitive).
    pub fn contains(&self, username: &str) -> bool {
        self.members.contains_key(&username.to_lowercase())
    }

    /// Display name for a member; falls back to the username itself.
    pub fn full_name(&self, username: &str) -> String {
        self.members
            .get(&username.to_lowercase())
            .cloned()
            .unwrap_or_else(|| username.to_string())
    }

    /// Usernames in deterministic (ascending) order.
    pub fn usernames(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }

    /// Number of roster members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True when the roster has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// True when the application name matches a qualifying work application.
    pub fn is_work_app(&self, app_name: Option<&str>) -> bool {
        let Some(app) = app_name else { return false };
        let lower = app.to_lowercase();
        self.work_apps.iter().any(|keyword| lower.contains(keyword))
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new(
            [
                ("tanmay_kudkar", "Tanmay Kudkar"),
                ("yash_thakur", "Yash Thakur"),
                ("nidhish_vartak", "Nidhish Vartak"),
                ("atharva_raut", "Atharva Raut"),
                ("parth_waghe", "Parth Waghe"),
            ]
            .into_iter()
            .map(|(u, n)| (u.to_string(), n.to_string())),
            ["Code.exe", "code", "idea64.exe", "idea", "intellij"]
                .into_iter()
                .map(str::to_string),
        )
    }
}
