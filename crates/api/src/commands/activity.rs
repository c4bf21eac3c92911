//! Activity tracking commands

use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;
use tracing::info;
use worktracker_domain::{
    ActivityLogRequest, ActivitySample, DashboardReport, MemberSummary, Result, WeeklySummary,
};

use crate::utils::logging::{error_label, log_command_execution};
use crate::AppContext;

/// Record one activity sample.
pub async fn log_activity(
    ctx: &Arc<AppContext>,
    request: ActivityLogRequest,
) -> Result<ActivitySample> {
    let command_name = "activity::log_activity";
    let start = Instant::now();

    let result = ctx.activity_service.log_activity(request).await;
    finish(command_name, start, &result);
    result
}

/// Full dashboard for one member and local day.
pub async fn get_dashboard(
    ctx: &Arc<AppContext>,
    username: &str,
    date: NaiveDate,
    tz_offset_minutes: i32,
) -> Result<DashboardReport> {
    let command_name = "activity::get_dashboard";
    let start = Instant::now();

    info!(command = command_name, username, %date, "building dashboard");
    let result = ctx.activity_service.get_dashboard(username, date, tz_offset_minutes).await;
    finish(command_name, start, &result);
    result
}

/// Per-member roll-up for one local day.
pub async fn get_members_summary(
    ctx: &Arc<AppContext>,
    date: NaiveDate,
    tz_offset_minutes: i32,
) -> Result<Vec<MemberSummary>> {
    let command_name = "activity::get_members_summary";
    let start = Instant::now();

    let result = ctx.activity_service.get_all_members_summary(date, tz_offset_minutes).await;
    finish(command_name, start, &result);
    result
}

/// Seven-day summary ending on the given date.
pub async fn get_weekly_summary(
    ctx: &Arc<AppContext>,
    end_date: NaiveDate,
    tz_offset_minutes: i32,
) -> Result<WeeklySummary> {
    let command_name = "activity::get_weekly_summary";
    let start = Instant::now();

    let result = ctx.activity_service.get_weekly_summary(end_date, tz_offset_minutes).await;
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
