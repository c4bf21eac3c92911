//! Session tracking commands

use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;
use tracing::info;
use worktracker_domain::{
    AppSession, AppSessionDigest, AppSessionView, MemberStatus, Result, SessionEventRequest,
    WorkSession,
};

use crate::utils::logging::{error_label, log_command_execution};
use crate::AppContext;

/// Apply a start/end/heartbeat event to the member state machine.
pub async fn process_session_event(
    ctx: &Arc<AppContext>,
    request: SessionEventRequest,
) -> Result<()> {
    let command_name = "sessions::process_session_event";
    let start = Instant::now();

    info!(
        command = command_name,
        username = %request.username,
        event_type = %request.event_type,
        "processing session event"
    );
    let result = ctx.session_service.process_session_event(request).await;
    finish(command_name, start, &result);
    result
}

/// Qualifying-application heartbeat driving work sessions.
pub async fn process_heartbeat(
    ctx: &Arc<AppContext>,
    username: &str,
    app_name: Option<&str>,
) -> Result<()> {
    let command_name = "sessions::process_heartbeat";
    let start = Instant::now();

    let result = ctx.session_service.process_heartbeat(username, app_name).await;
    finish(command_name, start, &result);
    result
}

/// Explicit logout.
pub async fn process_logout(ctx: &Arc<AppContext>, username: &str) -> Result<()> {
    let command_name = "sessions::process_logout";
    let start = Instant::now();

    let result = ctx.session_service.process_logout(username).await;
    finish(command_name, start, &result);
    result
}

/// Live status of every roster member.
pub async fn get_team_members(ctx: &Arc<AppContext>) -> Result<Vec<MemberStatus>> {
    let command_name = "sessions::get_team_members";
    let start = Instant::now();

    let result = ctx.session_service.get_all_members().await;
    finish(command_name, start, &result);
    result
}

/// A member's work sessions, most recent first.
pub async fn get_session_history(
    ctx: &Arc<AppContext>,
    username: &str,
) -> Result<Vec<WorkSession>> {
    let command_name = "sessions::get_session_history";
    let start = Instant::now();

    let result = ctx.session_service.get_session_history(username).await;
    finish(command_name, start, &result);
    result
}

/// Active work sessions across the team.
pub async fn get_active_work_sessions(ctx: &Arc<AppContext>) -> Result<Vec<WorkSession>> {
    let command_name = "sessions::get_active_work_sessions";
    let start = Instant::now();

    let result = ctx.session_service.get_active_sessions().await;
    finish(command_name, start, &result);
    result
}

/// Apply a start/end/heartbeat event to per-application sessions.
pub async fn record_app_session_event(
    ctx: &Arc<AppContext>,
    request: SessionEventRequest,
) -> Result<Option<AppSession>> {
    let command_name = "sessions::record_app_session_event";
    let start = Instant::now();

    let result = ctx.app_session_service.handle_session_event(request).await;
    finish(command_name, start, &result);
    result
}

/// App sessions started on one local day.
pub async fn get_app_sessions_for_date(
    ctx: &Arc<AppContext>,
    username: &str,
    date: NaiveDate,
    tz_offset_minutes: i32,
) -> Result<Vec<AppSessionView>> {
    let command_name = "sessions::get_app_sessions_for_date";
    let start = Instant::now();

    let result =
        ctx.app_session_service.get_sessions_for_date(username, date, tz_offset_minutes).await;
    finish(command_name, start, &result);
    result
}

/// A member's currently active app sessions.
pub async fn get_active_app_sessions(
    ctx: &Arc<AppContext>,
    username: &str,
) -> Result<Vec<AppSessionView>> {
    let command_name = "sessions::get_active_app_sessions";
    let start = Instant::now();

    let result = ctx.app_session_service.get_active_sessions(username).await;
    finish(command_name, start, &result);
    result
}

/// Daily app-session digest.
pub async fn get_app_sessions_summary(
    ctx: &Arc<AppContext>,
    username: &str,
    date: NaiveDate,
    tz_offset_minutes: i32,
) -> Result<AppSessionDigest> {
    let command_name = "sessions::get_app_sessions_summary";
    let start = Instant::now();

    let result =
        ctx.app_session_service.get_sessions_summary(username, date, tz_offset_minutes).await;
    finish(command_name, start, &result);
    result
}

fn finish<T>(command_name: &str, start: Instant, result: &Result<T>) {
    let elapsed = start.elapsed();
    log_command_execution(command_name, elapsed, result.is_ok());
    if let Err(err) = result {
        info!(command = command_name, error = error_label(err), "command failed");
    }
}
