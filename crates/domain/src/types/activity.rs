//! Activity sample types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One 30-second-quantum observation of a user's focused application.
///
/// Immutable once created; the sample stream is append-only. Timestamps are
/// stored in UTC.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySample {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub username: String,
    pub application_name: Option<String>,
    pub window_title: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Inbound activity report from a tracker client.
///
/// `timestamp` is an optional client-supplied ISO-8601 string; unparsable
/// values are replaced by the ingestion time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogRequest {
    pub username: String,
    pub application_name: Option<String>,
    pub window_title: Option<String>,
    pub timestamp: Option<String>,
}
