//! Time helpers for sample-window arithmetic
//!
//! Stored timestamps are UTC. Callers describe their local day via a timezone
//! offset in minutes (e.g. IST = +330); the offset is clamped to UTC-14..UTC+14
//! at the boundary.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::constants::{TZ_OFFSET_MAX_MINUTES, TZ_OFFSET_MIN_MINUTES};
use crate::errors::{Result, WorkTrackerError};

/// Clamp a caller-supplied timezone offset to the valid UTC-14..UTC+14 range.
#[must_use]
pub fn clamp_tz_offset(tz_offset_minutes: i32) -> i32 {
    tz_offset_minutes.clamp(TZ_OFFSET_MIN_MINUTES, TZ_OFFSET_MAX_MINUTES)
}

/// Convert a local datetime to UTC by subtracting the offset.
#[must_use]
pub fn local_to_utc(local: NaiveDateTime, tz_offset_minutes: i32) -> DateTime<Utc> {
    (local - Duration::minutes(i64::from(clamp_tz_offset(tz_offset_minutes)))).and_utc()
}

/// Convert a stored UTC timestamp to the caller's local datetime.
#[must_use]
pub fn utc_to_local(utc: DateTime<Utc>, tz_offset_minutes: i32) -> NaiveDateTime {
    utc.naive_utc() + Duration::minutes(i64::from(clamp_tz_offset(tz_offset_minutes)))
}

/// UTC bounds of one local calendar day: `[local 00:00, local 23:59:59.999…]`.
#[must_use]
pub fn local_day_bounds(date: NaiveDate, tz_offset_minutes: i32) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = local_to_utc(date.and_time(NaiveTime::MIN), tz_offset_minutes);
    let end_of_day = NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).unwrap_or(NaiveTime::MIN);
    let end = local_to_utc(date.and_time(end_of_day), tz_offset_minutes);
    (start, end)
}

/// Parse a client-supplied timestamp string.
///
/// Accepts RFC 3339 ("2024-01-15T09:30:00Z", with offset) or a bare ISO-8601
/// local datetime ("2024-01-15T09:30:00"), which is taken as already being in
/// the storage timezone (UTC). Returns `MalformedTimestamp` for anything else;
/// callers recover by substituting the ingestion time.
pub fn parse_client_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(parsed.and_utc());
    }
    Err(WorkTrackerError::MalformedTimestamp(raw.to_string()))
}
