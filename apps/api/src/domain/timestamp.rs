// Wire format for stored timestamps

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serializer;

/// Formats a timestamp as RFC 3339 in UTC with microsecond precision
///
/// Postgres keeps microseconds, so every record renders with the same
/// width: `2024-01-02T03:04:05.150720Z`.
pub fn format(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn serialize<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(at))
}
