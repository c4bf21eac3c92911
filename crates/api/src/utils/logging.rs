use std::time::Duration;

use tracing::{info, warn};
use worktracker_domain::WorkTrackerError;

/// Log the outcome of a command execution with structured fields.
///
/// `command` is the logical command identifier (e.g.
/// `"activity::get_dashboard"`). The helper keeps the command wrappers
/// concise and the log shape uniform. Callers must avoid forwarding
/// sensitive values in `command`.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, success: bool) {
    let duration_ms = elapsed.as_millis() as u64;

    if success {
        info!(command, duration_ms, "command_execution_success");
    } else {
        warn!(command, duration_ms, "command_execution_failure");
    }
}

/// Convert a `WorkTrackerError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &WorkTrackerError) -> &'static str {
    match error {
        WorkTrackerError::InvalidMember(_) => "invalid_member",
        WorkTrackerError::InvalidEventType(_) => "invalid_event_type",
        WorkTrackerError::MalformedTimestamp(_) => "malformed_timestamp",
        WorkTrackerError::Database(_) => "database",
        WorkTrackerError::Config(_) => "config",
        WorkTrackerError::NotFound(_) => "not_found",
        WorkTrackerError::InvalidInput(_) => "invalid_input",
        WorkTrackerError::Internal(_) => "internal",
    }
}
