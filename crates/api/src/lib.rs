//! # WorkTracker API
//!
//! Application wiring and the command layer exposed to transports. The
//! [`AppContext`] builds every repository, service and scheduler from a
//! [`worktracker_domain::Config`]; the `commands` modules are thin async
//! functions over it with uniform structured logging.

pub mod commands;
pub mod context;
pub mod utils;

pub use commands::activity::{
    get_dashboard, get_members_summary, get_weekly_summary, log_activity,
};
pub use commands::sessions::{
    get_active_app_sessions, get_active_work_sessions, get_app_sessions_for_date,
    get_app_sessions_summary, get_session_history, get_team_members, process_heartbeat,
    process_logout, process_session_event, record_app_session_event,
};
pub use context::AppContext;
