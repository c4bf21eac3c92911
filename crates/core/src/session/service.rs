//! Work-session and member state-machine service

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::info;
use worktracker_domain::{
    MemberStatus, Result, Roster, SessionEventKind, SessionEventRequest, TeamMember, WorkSession,
    WorkTrackerError,
};

use super::ports::{TeamMemberRepository, WorkSessionRepository};
use crate::classify::normalize_app_name;

/// Drives each member's Working/Idle state and their coarse work sessions.
///
/// All mutating paths for one member run under that member's async mutex, so
/// concurrent events from a flaky client cannot create two active work
/// sessions for the same user. Reads are lock-free.
pub struct SessionService {
    sessions: Arc<dyn WorkSessionRepository>,
    members: Arc<dyn TeamMemberRepository>,
    roster: Arc<Roster>,
    user_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl SessionService {
    pub fn new(
        sessions: Arc<dyn WorkSessionRepository>,
        members: Arc<dyn TeamMemberRepository>,
        roster: Arc<Roster>,
    ) -> Self {
        Self { sessions, members, roster, user_locks: DashMap::new() }
    }

    /// Apply one start/end/heartbeat event to the member state machine.
    ///
    /// Unknown event types are rejected, not silently dropped.
    pub async fn process_session_event(&self, request: SessionEventRequest) -> Result<()> {
        let username = self.require_member(&request.username)?;
        let kind = SessionEventKind::parse(&request.event_type)
            .ok_or_else(|| WorkTrackerError::InvalidEventType(request.event_type.clone()))?;

        let lock = self.user_lock(&username);
        let _guard = lock.lock().await;

        let mut member = self.ensure_member(&username).await?;
        let app = normalize_app_name(Some(request.application_name.as_str()));
        match kind {
            SessionEventKind::Start => {
                member.mark_working(app);
                self.members.save(&member).await?;
                info!(username = %username, application = %request.application_name, "member started working");
            }
            SessionEventKind::End => {
                member.mark_idle();
                self.members.save(&member).await?;
                info!(username = %username, application = %request.application_name, "member stopped working");
            }
            SessionEventKind::Heartbeat => {
                member.mark_working(app);
                self.members.save(&member).await?;
            }
        }
        Ok(())
    }

    /// Qualifying-application heartbeat.
    ///
    /// A heartbeat from a work application keeps (or opens) the member's
    /// single active work session, closing and reopening it on an
    /// application switch. A heartbeat from any other application closes the
    /// active session and marks the member idle.
    pub async fn process_heartbeat(&self, username: &str, app_name: Option<&str>) -> Result<()> {
        self.heartbeat_at(username, app_name, Utc::now()).await
    }

    /// Same as [`Self::process_heartbeat`] with an explicit instant.
    pub async fn heartbeat_at(
        &self,
        username: &str,
        app_name: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let username = self.require_member(username)?;

        let lock = self.user_lock(&username);
        let _guard = lock.lock().await;

        let mut member = self.ensure_member(&username).await?;
        if self.roster.is_work_app(app_name) {
            let app = normalize_app_name(app_name);
            self.continue_or_open_session(&mut member, &app, now).await?;
        } else {
            self.close_active_session(&mut member, now).await?;
        }
        Ok(())
    }

    /// Explicit logout: close any active work session and mark the member
    /// idle.
    pub async fn process_logout(&self, username: &str) -> Result<()> {
        let username = self.require_member(username)?;

        let lock = self.user_lock(&username);
        let _guard = lock.lock().await;

        if let Some(mut member) = self.members.find_by_username(&username).await? {
            self.close_active_session(&mut member, Utc::now()).await?;
            info!(username = %username, "member logged out");
        }
        Ok(())
    }

    /// Live status for every roster member, sorted by total working minutes
    /// descending.
    pub async fn get_all_members(&self) -> Result<Vec<MemberStatus>> {
        self.members_status_at(Utc::now()).await
    }

    /// Same as [`Self::get_all_members`] with an explicit instant for
    /// in-flight session elapsed time.
    pub async fn members_status_at(&self, now: DateTime<Utc>) -> Result<Vec<MemberStatus>> {
        let mut statuses = Vec::with_capacity(self.roster.len());
        for username in self.roster.usernames() {
            let member = self
                .members
                .find_by_username(username)
                .await?
                .unwrap_or_else(|| TeamMember::new(username, self.roster.full_name(username)));

            let mut total_minutes = self.sessions.total_minutes(username).await?;
            if let Some(active) = self.sessions.find_active(username).await? {
                total_minutes += (now - active.login_time).num_minutes();
            }

            statuses.push(MemberStatus {
                username: username.to_string(),
                full_name: member.full_name,
                total_working_minutes: total_minutes,
                total_working_hours: format!("{:.1}", total_minutes as f64 / 60.0),
                is_currently_working: member.is_currently_working,
                current_application: member.current_application,
            });
        }
        statuses.sort_by(|a, b| {
            b.total_working_minutes
                .cmp(&a.total_working_minutes)
                .then_with(|| a.username.cmp(&b.username))
        });
        Ok(statuses)
    }

    /// A member's work sessions, most recent first.
    pub async fn get_session_history(&self, username: &str) -> Result<Vec<WorkSession>> {
        let username = self.require_member(username)?;
        self.sessions.find_by_username(&username).await
    }

    /// Every active work session across the team.
    pub async fn get_active_sessions(&self) -> Result<Vec<WorkSession>> {
        self.sessions.find_all_active().await
    }

    async fn continue_or_open_session(
        &self,
        member: &mut TeamMember,
        app: &str,
        now: DateTime<Utc>,
    ) -> Result<()> {
        match self.sessions.find_active(&member.username).await? {
            Some(active) if active.application_name != app => {
                self.end_session(active, now).await?;
                self.open_session(member, app, now).await
            }
            Some(_) => Ok(()),
            None => self.open_session(member, app, now).await,
        }
    }

    async fn open_session(
        &self,
        member: &mut TeamMember,
        app: &str,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let session = WorkSession {
            id: None,
            username: member.username.clone(),
            application_name: app.to_string(),
            login_time: now,
            logout_time: None,
            duration_minutes: 0,
            is_active: true,
        };
        self.sessions.save(&session).await?;

        member.mark_working(app);
        self.members.save(member).await?;
        info!(username = %member.username, application = %app, "work session opened");
        Ok(())
    }

    async fn close_active_session(
        &self,
        member: &mut TeamMember,
        now: DateTime<Utc>,
    ) -> Result<()> {
        if let Some(active) = self.sessions.find_active(&member.username).await? {
            self.end_session(active, now).await?;
        }
        member.mark_idle();
        self.members.save(member).await?;
        Ok(())
    }

    async fn end_session(&self, mut session: WorkSession, now: DateTime<Utc>) -> Result<()> {
        session.logout_time = Some(now);
        session.is_active = false;
        session.duration_minutes = (now - session.login_time).num_minutes();
        self.sessions.save(&session).await?;
        info!(
            username = %session.username,
            application = %session.application_name,
            minutes = session.duration_minutes,
            "work session closed"
        );
        Ok(())
    }

    async fn ensure_member(&self, username: &str) -> Result<TeamMember> {
        if let Some(member) = self.members.find_by_username(username).await? {
            return Ok(member);
        }
        let mut member = TeamMember::new(username, self.roster.full_name(username));
        member.id = Some(self.members.save(&member).await?);
        Ok(member)
    }

    fn user_lock(&self, username: &str) -> Arc<Mutex<()>> {
        self.user_locks.entry(username.to_string()).or_default().clone()
    }

    fn require_member(&self, username: &str) -> Result<String> {
        if self.roster.contains(username) {
            Ok(username.to_lowercase())
        } else {
            Err(WorkTrackerError::InvalidMember(username.to_string()))
        }
    }
}
