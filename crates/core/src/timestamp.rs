//! Lenient timestamp parsing
//!
//! Donor records arrive from the donor-management API with dates in whatever
//! shape the admin panel saved them. Anything that cannot be read becomes
//! `None`; callers decide what an absent date means.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a timestamp string, returning `None` for blank or unreadable input.
///
/// Accepted shapes, tried in order:
/// - RFC 3339 (`2024-03-01T10:00:00Z`, `2024-03-01T10:00:00+06:00`)
/// - naive ISO-8601 date-time, with `T` or a space separator (read as UTC)
/// - date only (`2024-03-01`, midnight UTC)
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    tracing::debug!(input = %s, "Unparseable timestamp, treating as absent");
    None
}

/// Parse an optional timestamp string
pub fn parse_timestamp_opt(input: Option<&str>) -> Option<DateTime<Utc>> {
    input.and_then(parse_timestamp)
}

/// Serde adapter for optional, leniently parsed timestamps.
///
/// Accepts a string, `null`, or a missing field. Strings that fail to parse
/// deserialize to `None` instead of rejecting the whole record.
pub mod lenient {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(match raw {
            Some(serde_json::Value::String(s)) => super::parse_timestamp(&s),
            _ => None,
        })
    }

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }
}
