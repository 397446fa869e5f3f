//! Server timestamps (RFC 3339, UTC, whole seconds).

use chrono::{DateTime, Duration, DurationRound, SecondsFormat, Utc};

use crate::error::{ApiError, Result};

/// Current UTC time, e.g. `2020-01-02T03:04:05Z`.
pub fn current_timestamp() -> String {
    format_timestamp(Utc::now())
}

pub fn format_timestamp(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Drop minutes, seconds and sub-seconds.
pub fn truncate_to_hour(t: DateTime<Utc>) -> Result<DateTime<Utc>> {
    t.duration_trunc(Duration::hours(1))
        .map_err(|e| ApiError::Internal(format!("timestamp truncation failed: {e}")))
}

/// Parse an RFC 3339 timestamp and truncate it to the hour (in UTC).
pub fn truncate_timestamp_to_hour(ts: &str) -> Result<String> {
    let t = DateTime::parse_from_rfc3339(ts)
        .map_err(|e| ApiError::Internal(format!("invalid timestamp {ts:?}: {e}")))?;
    Ok(format_timestamp(truncate_to_hour(t.with_timezone(&Utc))?))
}
