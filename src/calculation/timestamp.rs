//! Timestamp parsing for stored clock-in/clock-out strings.

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::debug;

/// Naive layouts accepted after RFC 3339. They carry no offset and are
/// read as UTC.
const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parses an ISO-8601 timestamp into an absolute instant.
///
/// Accepts RFC 3339 strings with any offset, and naive date-times which are
/// taken to be UTC. Empty or unparseable input yields `None`, which the
/// calculator treats the same as an absent timestamp.
///
/// # Examples
///
/// ```
/// use timesheet_engine::calculation::parse_timestamp;
/// use chrono::{TimeZone, Utc};
///
/// let expected = Utc.with_ymd_and_hms(2023, 6, 1, 9, 0, 0).unwrap();
/// assert_eq!(parse_timestamp("2023-06-01T09:00:00Z"), Some(expected));
/// assert_eq!(parse_timestamp("2023-06-01T11:00:00+02:00"), Some(expected));
/// assert_eq!(parse_timestamp(""), None);
/// ```
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok());

    if naive.is_none() {
        debug!(value = %trimmed, "Unparseable timestamp treated as absent");
    }

    naive.map(|value| value.and_utc())
}
