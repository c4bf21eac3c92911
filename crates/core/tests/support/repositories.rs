//! Mock repository implementations for testing
//!
//! In-memory mocks for all core repository ports, enabling deterministic
//! tests without database dependencies.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use worktracker_core::activity::ports::SampleRepository;
use worktracker_core::session::ports::{
    AppSessionRepository, TeamMemberRepository, WorkSessionRepository,
};
use worktracker_domain::{
    ActivitySample, AppSession, EndReason, Result as DomainResult, TeamMember, WorkSession,
    WorkTrackerError,
};

fn next_id(counter: &AtomicI64) -> i64 {
    counter.fetch_add(1, Ordering::SeqCst) + 1
}

/// In-memory mock for `SampleRepository`.
///
/// Optionally fails every lookup for one username, for failure-isolation
/// tests.
#[derive(Default, Clone)]
pub struct MockSampleRepository {
    samples: Arc<Mutex<Vec<ActivitySample>>>,
    ids: Arc<AtomicI64>,
    fail_for: Option<String>,
}

impl MockSampleRepository {
    pub fn new(samples: Vec<ActivitySample>) -> Self {
        Self { samples: Arc::new(Mutex::new(samples)), ..Self::default() }
    }

    /// Mock whose queries fail for the given username.
    pub fn failing_for(samples: Vec<ActivitySample>, username: &str) -> Self {
        Self {
            samples: Arc::new(Mutex::new(samples)),
            ids: Arc::default(),
            fail_for: Some(username.to_string()),
        }
    }

    pub fn stored(&self) -> Vec<ActivitySample> {
        self.samples.lock().clone()
    }
}

#[async_trait]
impl SampleRepository for MockSampleRepository {
    async fn save_sample(&self, sample: &ActivitySample) -> DomainResult<i64> {
        let id = next_id(&self.ids);
        let mut stored = sample.clone();
        stored.id = Some(id);
        self.samples.lock().push(stored);
        Ok(id)
    }

    async fn find_samples(
        &self,
        username: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Vec<ActivitySample>> {
        if self.fail_for.as_deref() == Some(username) {
            return Err(WorkTrackerError::Database("simulated lookup failure".to_string()));
        }
        let mut matching: Vec<ActivitySample> = self
            .samples
            .lock()
            .iter()
            .filter(|s| s.username == username && s.timestamp >= start && s.timestamp <= end)
            .cloned()
            .collect();
        matching.sort_by_key(|s| s.timestamp);
        Ok(matching)
    }
}

/// In-memory mock for `TeamMemberRepository`. Upserts by username.
#[derive(Default, Clone)]
pub struct MockTeamMemberRepository {
    members: Arc<Mutex<Vec<TeamMember>>>,
    ids: Arc<AtomicI64>,
}

impl MockTeamMemberRepository {
    pub fn new(members: Vec<TeamMember>) -> Self {
        Self { members: Arc::new(Mutex::new(members)), ids: Arc::default() }
    }

    pub fn stored(&self) -> Vec<TeamMember> {
        self.members.lock().clone()
    }
}

#[async_trait]
impl TeamMemberRepository for MockTeamMemberRepository {
    async fn find_by_username(&self, username: &str) -> DomainResult<Option<TeamMember>> {
        Ok(self.members.lock().iter().find(|m| m.username == username).cloned())
    }

    async fn save(&self, member: &TeamMember) -> DomainResult<i64> {
        let mut members = self.members.lock();
        if let Some(existing) = members.iter_mut().find(|m| m.username == member.username) {
            let id = existing.id.unwrap_or_else(|| next_id(&self.ids));
            *existing = member.clone();
            existing.id = Some(id);
            Ok(id)
        } else {
            let id = member.id.unwrap_or_else(|| next_id(&self.ids));
            let mut stored = member.clone();
            stored.id = Some(id);
            members.push(stored);
            Ok(id)
        }
    }

    async fn find_working(&self) -> DomainResult<Vec<TeamMember>> {
        Ok(self.members.lock().iter().filter(|m| m.is_currently_working).cloned().collect())
    }
}

/// In-memory mock for `WorkSessionRepository`. Upserts by id.
#[derive(Default, Clone)]
pub struct MockWorkSessionRepository {
    sessions: Arc<Mutex<Vec<WorkSession>>>,
    ids: Arc<AtomicI64>,
}

impl MockWorkSessionRepository {
    pub fn new(sessions: Vec<WorkSession>) -> Self {
        Self { sessions: Arc::new(Mutex::new(sessions)), ids: Arc::default() }
    }

    pub fn stored(&self) -> Vec<WorkSession> {
        self.sessions.lock().clone()
    }
}

#[async_trait]
impl WorkSessionRepository for MockWorkSessionRepository {
    async fn find_active(&self, username: &str) -> DomainResult<Option<WorkSession>> {
        Ok(self
            .sessions
            .lock()
            .iter()
            .find(|s| s.username == username && s.is_active)
            .cloned())
    }

    async fn save(&self, session: &WorkSession) -> DomainResult<i64> {
        let mut sessions = self.sessions.lock();
        match session.id {
            Some(id) => {
                if let Some(existing) = sessions.iter_mut().find(|s| s.id == Some(id)) {
                    *existing = session.clone();
                } else {
                    sessions.push(session.clone());
                }
                Ok(id)
            }
            None => {
                let id = next_id(&self.ids);
                let mut stored = session.clone();
                stored.id = Some(id);
                sessions.push(stored);
                Ok(id)
            }
        }
    }

    async fn total_minutes(&self, username: &str) -> DomainResult<i64> {
        Ok(self
            .sessions
            .lock()
            .iter()
            .filter(|s| s.username == username && !s.is_active)
            .map(|s| s.duration_minutes)
            .sum())
    }

    async fn find_by_username(&self, username: &str) -> DomainResult<Vec<WorkSession>> {
        let mut matching: Vec<WorkSession> = self
            .sessions
            .lock()
            .iter()
            .filter(|s| s.username == username)
            .cloned()
            .collect();
        matching.sort_by_key(|s| std::cmp::Reverse(s.login_time));
        Ok(matching)
    }

    async fn find_all_active(&self) -> DomainResult<Vec<WorkSession>> {
        Ok(self.sessions.lock().iter().filter(|s| s.is_active).cloned().collect())
    }
}

/// In-memory mock for `AppSessionRepository`. Upserts by id.
#[derive(Default, Clone)]
pub struct MockAppSessionRepository {
    sessions: Arc<Mutex<Vec<AppSession>>>,
    ids: Arc<AtomicI64>,
}

impl MockAppSessionRepository {
    pub fn new(sessions: Vec<AppSession>) -> Self {
        Self { sessions: Arc::new(Mutex::new(sessions)), ids: Arc::default() }
    }

    pub fn stored(&self) -> Vec<AppSession> {
        self.sessions.lock().clone()
    }
}

#[async_trait]
impl AppSessionRepository for MockAppSessionRepository {
    async fn find_active(
        &self,
        username: &str,
        application_name: &str,
    ) -> DomainResult<Option<AppSession>> {
        Ok(self
            .sessions
            .lock()
            .iter()
            .find(|s| s.username == username && s.application_name == application_name && s.is_active)
            .cloned())
    }

    async fn save(&self, session: &AppSession) -> DomainResult<i64> {
        let mut sessions = self.sessions.lock();
        match session.id {
            Some(id) => {
                if let Some(existing) = sessions.iter_mut().find(|s| s.id == Some(id)) {
                    *existing = session.clone();
                } else {
                    sessions.push(session.clone());
                }
                Ok(id)
            }
            None => {
                let id = next_id(&self.ids);
                let mut stored = session.clone();
                stored.id = Some(id);
                sessions.push(stored);
                Ok(id)
            }
        }
    }

    async fn find_in_range(
        &self,
        username: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Vec<AppSession>> {
        let mut matching: Vec<AppSession> = self
            .sessions
            .lock()
            .iter()
            .filter(|s| s.username == username && s.start_time >= start && s.start_time <= end)
            .cloned()
            .collect();
        matching.sort_by_key(|s| std::cmp::Reverse(s.start_time));
        Ok(matching)
    }

    async fn find_active_by_username(&self, username: &str) -> DomainResult<Vec<AppSession>> {
        let mut matching: Vec<AppSession> = self
            .sessions
            .lock()
            .iter()
            .filter(|s| s.username == username && s.is_active)
            .cloned()
            .collect();
        matching.sort_by_key(|s| std::cmp::Reverse(s.start_time));
        Ok(matching)
    }

    async fn close_timed_out(
        &self,
        cutoff: DateTime<Utc>,
        end_time_value: DateTime<Utc>,
    ) -> DomainResult<usize> {
        let mut sessions = self.sessions.lock();
        let mut closed = 0;
        for session in sessions.iter_mut().filter(|s| s.is_active && s.start_time < cutoff) {
            session.is_active = false;
            session.end_time = Some(end_time_value);
            session.end_reason = Some(EndReason::Timeout);
            session.duration_seconds = Some((end_time_value - session.start_time).num_seconds());
            closed += 1;
        }
        Ok(closed)
    }
}
