//! Domain types and models

pub mod activity;
pub mod category;
pub mod member;
pub mod reports;
pub mod session;

pub use activity::{ActivityLogRequest, ActivitySample};
pub use category::Category;
pub use member::TeamMember;
pub use reports::{
    AppSessionCount, AppSessionDigest, AppSessionView, AppUsage, CategoryAppMinutes,
    CategoryBreakdown, CategoryNode, CategorySlice, DailySummary, DashboardReport, HourlyBucket,
    MemberStatus, MemberSummary, MemberWeeklyTotal, WeeklySummary,
};
pub use session::{AppSession, EndReason, SessionEventKind, SessionEventRequest, WorkSession};
