//! Report and summary DTOs
//!
//! Output shapes of the aggregation and reporting layer. All of these are
//! plain serializable values; derivation logic lives in `worktracker-core`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One application's share of a member's day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppUsage {
    pub name: String,
    pub minutes: i64,
    pub seconds: i64,
    pub percentage: f64,
}

/// One of the 24 fixed hourly buckets, in the caller's local time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HourlyBucket {
    pub hour: u32,
    /// "HH:00"
    pub label: String,
    pub minutes: i64,
    pub active: bool,
}

/// Flat category share.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategorySlice {
    pub name: String,
    pub minutes: i64,
    pub percentage: f64,
    pub color: String,
}

/// Per-application minutes within a category node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAppMinutes {
    pub name: String,
    pub minutes: i64,
}

/// Two-level tree node: category -> normalized application -> minutes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNode {
    pub category: String,
    pub color: String,
    pub total_minutes: i64,
    pub applications: Vec<CategoryAppMinutes>,
}

/// Category section of a dashboard: flat slices plus the grouping tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub categories: Vec<CategorySlice>,
    pub tree: Vec<CategoryNode>,
}

/// One member's dashboard for one local day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub username: String,
    pub full_name: String,
    pub date: NaiveDate,
    pub total_active_minutes: i64,
    pub top_applications: Vec<AppUsage>,
    pub hourly_activity: Vec<HourlyBucket>,
    pub categories: CategoryBreakdown,
}

/// Per-member roll-up used by the all-members summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MemberSummary {
    pub username: String,
    pub full_name: String,
    pub total_active_minutes: i64,
    /// Hours with one decimal, e.g. "7.5".
    pub total_active_hours: String,
    pub is_active: bool,
    pub current_application: Option<String>,
    pub top_app: Option<String>,
}

/// Live member status merging stored totals with any running work session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MemberStatus {
    pub username: String,
    pub full_name: String,
    pub total_working_minutes: i64,
    /// Hours with one decimal, e.g. "7.5".
    pub total_working_hours: String,
    pub is_currently_working: bool,
    pub current_application: Option<String>,
}

/// One local day within a weekly summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub date: NaiveDate,
    pub total_active_minutes: i64,
    pub members: Vec<MemberSummary>,
}

/// Seven-day window ending on the requested date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySummary {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: Vec<DailySummary>,
    /// Per-member weekly totals, sorted descending by minutes.
    pub member_totals: Vec<MemberWeeklyTotal>,
}

/// A member's total across a weekly window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MemberWeeklyTotal {
    pub username: String,
    pub full_name: String,
    pub total_active_minutes: i64,
}

/// Presentation view of an app session with formatted fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppSessionView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub application_name: String,
    pub process_name: Option<String>,
    pub start_time: chrono::DateTime<chrono::Utc>,
    pub end_time: Option<chrono::DateTime<chrono::Utc>>,
    pub is_active: bool,
    pub end_reason: Option<String>,
    pub duration_seconds: Option<i64>,
    /// "1h 2m 3s", "4m (running)" or "Just started".
    pub formatted_duration: String,
    /// "HH:MM:SS"
    pub formatted_start_time: Option<String>,
    pub formatted_end_time: Option<String>,
}

/// Daily app-session digest: totals, end-reason counts and top apps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppSessionDigest {
    pub total_sessions: usize,
    pub active_sessions: usize,
    pub normal_ends: usize,
    pub killed_ends: usize,
    pub app_counts: Vec<AppSessionCount>,
    /// Most recent sessions, capped at `SESSION_DIGEST_LIMIT`.
    pub sessions: Vec<AppSessionView>,
}

/// Session count for one application.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppSessionCount {
    pub name: String,
    pub count: i64,
}
