//! Per-application focus-session service

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{info, warn};
use worktracker_domain::constants::{SESSION_DIGEST_LIMIT, TOP_APPLICATIONS_LIMIT};
use worktracker_domain::utils::time::local_day_bounds;
use worktracker_domain::{
    AppSession, AppSessionCount, AppSessionDigest, AppSessionView, EndReason, Result, Roster,
    SessionEventKind, SessionEventRequest, WorkTrackerError,
};

use super::ports::AppSessionRepository;
use crate::classify::normalize_process_name;

/// Tracks per-application focus bouts bounded by explicit start/end events.
///
/// The application name is normalized exactly once, at event entry, so
/// lookups and stored rows always agree on the key. Event handling for one
/// member runs under that member's async mutex, so replayed or concurrent
/// start events cannot open two active sessions for the same
/// (username, application) pair.
pub struct AppSessionService {
    sessions: Arc<dyn AppSessionRepository>,
    roster: Arc<Roster>,
    user_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl AppSessionService {
    pub fn new(sessions: Arc<dyn AppSessionRepository>, roster: Arc<Roster>) -> Self {
        Self { sessions, roster, user_locks: DashMap::new() }
    }

    /// Apply one start/end/heartbeat event.
    ///
    /// Returns the affected session, or `None` for an end event with no
    /// matching active session.
    pub async fn handle_session_event(
        &self,
        request: SessionEventRequest,
    ) -> Result<Option<AppSession>> {
        self.handle_event_at(request, Utc::now()).await
    }

    /// Same as [`Self::handle_session_event`] with an explicit instant.
    pub async fn handle_event_at(
        &self,
        request: SessionEventRequest,
        now: DateTime<Utc>,
    ) -> Result<Option<AppSession>> {
        let username = self.require_member(&request.username)?;
        let app = normalize_process_name(Some(request.application_name.as_str()));

        let lock = self.user_lock(&username);
        let _guard = lock.lock().await;

        match SessionEventKind::parse(&request.event_type) {
            Some(SessionEventKind::Start) => {
                self.start_session(&username, &app, request.process_name, now).await.map(Some)
            }
            Some(SessionEventKind::End) => {
                self.end_session(&username, &app, request.end_reason.as_deref(), now).await
            }
            Some(SessionEventKind::Heartbeat) => {
                // A heartbeat revives a session the backend never saw start.
                match self.sessions.find_active(&username, &app).await? {
                    Some(existing) => Ok(Some(existing)),
                    None => {
                        self.start_session(&username, &app, request.process_name, now)
                            .await
                            .map(Some)
                    }
                }
            }
            None => Err(WorkTrackerError::InvalidEventType(request.event_type)),
        }
    }

    /// Sessions started on one local day, most recent first.
    pub async fn get_sessions_for_date(
        &self,
        username: &str,
        date: NaiveDate,
        tz_offset_minutes: i32,
    ) -> Result<Vec<AppSessionView>> {
        let username = self.require_member(username)?;
        let (start, end) = local_day_bounds(date, tz_offset_minutes);
        let sessions = self.sessions.find_in_range(&username, start, end).await?;
        let now = Utc::now();
        Ok(sessions.iter().map(|session| view_at(session, now)).collect())
    }

    /// A member's currently active sessions, most recent first.
    pub async fn get_active_sessions(&self, username: &str) -> Result<Vec<AppSessionView>> {
        let username = self.require_member(username)?;
        let sessions = self.sessions.find_active_by_username(&username).await?;
        let now = Utc::now();
        Ok(sessions.iter().map(|session| view_at(session, now)).collect())
    }

    /// Digest for one local day: totals, end-reason counts, per-app counts
    /// and the most recent sessions.
    pub async fn get_sessions_summary(
        &self,
        username: &str,
        date: NaiveDate,
        tz_offset_minutes: i32,
    ) -> Result<AppSessionDigest> {
        let username = self.require_member(username)?;
        let (start, end) = local_day_bounds(date, tz_offset_minutes);
        let sessions = self.sessions.find_in_range(&username, start, end).await?;
        let now = Utc::now();

        let mut counts: BTreeMap<&str, i64> = BTreeMap::new();
        for session in &sessions {
            *counts.entry(session.application_name.as_str()).or_default() += 1;
        }
        let mut app_counts: Vec<AppSessionCount> = counts
            .into_iter()
            .map(|(name, count)| AppSessionCount { name: name.to_string(), count })
            .collect();
        app_counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        app_counts.truncate(TOP_APPLICATIONS_LIMIT);

        Ok(AppSessionDigest {
            total_sessions: sessions.len(),
            active_sessions: sessions.iter().filter(|s| s.is_active).count(),
            normal_ends: sessions
                .iter()
                .filter(|s| s.end_reason == Some(EndReason::Normal))
                .count(),
            killed_ends: sessions
                .iter()
                .filter(|s| s.end_reason == Some(EndReason::Killed))
                .count(),
            app_counts,
            sessions: sessions
                .iter()
                .take(SESSION_DIGEST_LIMIT)
                .map(|session| view_at(session, now))
                .collect(),
        })
    }

    /// Close every active session older than `cutoff`, marking it timed out.
    pub async fn close_timed_out(
        &self,
        cutoff: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<usize> {
        let closed = self.sessions.close_timed_out(cutoff, now).await?;
        if closed > 0 {
            info!(closed, "closed timed-out app sessions");
        }
        Ok(closed)
    }

    async fn start_session(
        &self,
        username: &str,
        app: &str,
        process_name: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<AppSession> {
        // Duplicate starts are absorbed, keeping the single-active-session
        // invariant per (user, app).
        if let Some(existing) = self.sessions.find_active(username, app).await? {
            return Ok(existing);
        }

        let mut session = AppSession {
            id: None,
            username: username.to_string(),
            application_name: app.to_string(),
            process_name,
            start_time: now,
            end_time: None,
            is_active: true,
            end_reason: None,
            duration_seconds: None,
        };
        session.id = Some(self.sessions.save(&session).await?);
        info!(username = %username, application = %app, "app session started");
        Ok(session)
    }

    async fn end_session(
        &self,
        username: &str,
        app: &str,
        end_reason: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Option<AppSession>> {
        let Some(mut session) = self.sessions.find_active(username, app).await? else {
            return Ok(None);
        };

        let reason = match end_reason {
            None => EndReason::Normal,
            Some(raw) => EndReason::parse(raw).unwrap_or_else(|| {
                warn!(username = %username, end_reason = %raw, "unknown end reason, recording as normal");
                EndReason::Normal
            }),
        };

        session.end_time = Some(now);
        session.is_active = false;
        session.end_reason = Some(reason);
        session.duration_seconds = Some((now - session.start_time).num_seconds());
        self.sessions.save(&session).await?;
        info!(username = %username, application = %app, reason = %reason, "app session ended");
        Ok(Some(session))
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

/// Presentation view of a session evaluated at `now`.
fn view_at(session: &AppSession, now: DateTime<Utc>) -> AppSessionView {
    AppSessionView {
        id: session.id,
        application_name: session.application_name.clone(),
        process_name: session.process_name.clone(),
        start_time: session.start_time,
        end_time: session.end_time,
        is_active: session.is_active,
        end_reason: session.end_reason.map(|reason| reason.as_str().to_string()),
        duration_seconds: session.duration_seconds,
        formatted_duration: format_duration(session, now),
        formatted_start_time: Some(session.start_time.format("%H:%M:%S").to_string()),
        formatted_end_time: session.end_time.map(|end| end.format("%H:%M:%S").to_string()),
    }
}

fn format_duration(session: &AppSession, now: DateTime<Utc>) -> String {
    if let Some(total) = session.duration_seconds {
        let hours = total / 3600;
        let minutes = (total % 3600) / 60;
        let seconds = total % 60;
        if hours > 0 {
            format!("{hours}h {minutes}m {seconds}s")
        } else if minutes > 0 {
            format!("{minutes}m {seconds}s")
        } else {
            format!("{seconds}s")
        }
    } else if session.is_active {
        let minutes = (now - session.start_time).num_seconds() / 60;
        if minutes > 0 {
            format!("{minutes}m (running)")
        } else {
            "Just started".to_string()
        }
    } else {
        "N/A".to_string()
    }
}
