//! "Time since last donation" display strings
//!
//! Months are a flat 30 days. Display only, never used for eligibility.

use chrono::{DateTime, Utc};

use super::elapsed_days;

const DAYS_PER_MONTH: i64 = 30;

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", count, unit)
    }
}

/// Format a whole-day count as "today", "N days ago" or "M months D days ago".
///
/// Counts of zero or below read as "today".
pub fn humanize_elapsed_days(days: i64) -> String {
    if days <= 0 {
        return "today".to_string();
    }

    let months = days / DAYS_PER_MONTH;
    let rest = days % DAYS_PER_MONTH;

    if months == 0 {
        format!("{} ago", plural(rest, "day"))
    } else {
        format!("{} {} ago", plural(months, "month"), plural(rest, "day"))
    }
}

/// Describe how long ago the last donation was, relative to `now`
pub fn time_since_donation(last_donation: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    match last_donation {
        Some(last) => humanize_elapsed_days(elapsed_days(last, now)),
        None => "never donated".to_string(),
    }
}
