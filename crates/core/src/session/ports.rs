//! Session persistence ports

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use worktracker_domain::{AppSession, Result, TeamMember, WorkSession};

/// Storage abstraction for roster member records.
#[async_trait]
pub trait TeamMemberRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<TeamMember>>;

    /// Insert or update by username; returns the row id.
    async fn save(&self, member: &TeamMember) -> Result<i64>;

    /// Members currently in the Working state.
    async fn find_working(&self) -> Result<Vec<TeamMember>>;
}

/// Storage abstraction for coarse per-user work sessions.
#[async_trait]
pub trait WorkSessionRepository: Send + Sync {
    /// The single active session for a member, if one exists.
    async fn find_active(&self, username: &str) -> Result<Option<WorkSession>>;

    /// Insert or update by id; returns the row id.
    async fn save(&self, session: &WorkSession) -> Result<i64>;

    /// Sum of `duration_minutes` across a member's completed sessions.
    async fn total_minutes(&self, username: &str) -> Result<i64>;

    /// All of a member's sessions, ordered by login time descending.
    async fn find_by_username(&self, username: &str) -> Result<Vec<WorkSession>>;

    /// Every active session across all members.
    async fn find_all_active(&self) -> Result<Vec<WorkSession>>;
}

/// Storage abstraction for per-application focus sessions.
#[async_trait]
pub trait AppSessionRepository: Send + Sync {
    /// The active session for a (member, normalized application) pair.
    async fn find_active(
        &self,
        username: &str,
        application_name: &str,
    ) -> Result<Option<AppSession>>;

    /// Insert or update by id; returns the row id.
    async fn save(&self, session: &AppSession) -> Result<i64>;

    /// Sessions started within `[start, end]`, ordered by start time
    /// descending.
    async fn find_in_range(
        &self,
        username: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<AppSession>>;

    /// A member's active sessions, ordered by start time descending.
    async fn find_active_by_username(&self, username: &str) -> Result<Vec<AppSession>>;

    /// Close every active session that started before `cutoff`: set
    /// `end_time` to `end_time_value`, compute duration and mark the end
    /// reason as timeout. Returns the number of sessions closed.
    async fn close_timed_out(
        &self,
        cutoff: DateTime<Utc>,
        end_time_value: DateTime<Utc>,
    ) -> Result<usize>;
}
