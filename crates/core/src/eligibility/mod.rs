//! Donation eligibility evaluation
//!
//! A donor may give blood again once [`DONATION_INTERVAL_DAYS`] whole days
//! have elapsed since their last recorded donation. Eligibility is never
//! stored; it is derived from `(last_donation, now)` every time it is needed.
//!
//! A missing last-donation date means "never donated" and is eligible. Dates
//! that fail to parse upstream arrive here as `None` too, so bad data fails
//! open to eligible.

mod humanize;

pub use humanize::{humanize_elapsed_days, time_since_donation};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::invariants::{assert_cooling_within_interval, assert_eligibility_invariants};

/// Minimum whole days between two donations from the same donor
pub const DONATION_INTERVAL_DAYS: i64 = 120;

/// Classification of a donor's eligibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EligibilityStatus {
    /// No donation on record
    NeverDonated,
    /// Last donation is at least the full interval ago
    IntervalSatisfied,
    /// Still inside the interval
    CoolingDown,
}

impl EligibilityStatus {
    pub fn can_donate(&self) -> bool {
        !matches!(self, EligibilityStatus::CoolingDown)
    }
}

impl std::fmt::Display for EligibilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EligibilityStatus::NeverDonated => write!(f, "never donated"),
            EligibilityStatus::IntervalSatisfied => write!(f, "eligible"),
            EligibilityStatus::CoolingDown => write!(f, "cooling down"),
        }
    }
}

/// Result of evaluating a donor's eligibility at one instant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eligibility {
    pub can_donate: bool,
    pub status: EligibilityStatus,
    /// Short label for list views
    pub status_text: String,
    /// Full sentence for detail views
    pub message: String,
    /// Days until the donor may donate again, 0 when eligible
    pub days_remaining: i64,
}

/// Whole days between `last_donation` and `now`, rounded down.
///
/// Negative when `now` precedes `last_donation`.
pub fn elapsed_days(last_donation: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let elapsed = now.signed_duration_since(last_donation);
    // num_days truncates toward zero; step down for negative partial days
    let days = elapsed.num_days();
    if elapsed < Duration::days(days) {
        days - 1
    } else {
        days
    }
}

/// "day" or "days" for a count
pub fn day_unit(count: i64) -> &'static str {
    if count == 1 {
        "day"
    } else {
        "days"
    }
}

/// Evaluate eligibility at `now`.
pub fn evaluate(last_donation: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Eligibility {
    let eligibility = match last_donation {
        None => Eligibility {
            can_donate: true,
            status: EligibilityStatus::NeverDonated,
            status_text: "Available".to_string(),
            message: "No previous donation on record. Eligible to donate.".to_string(),
            days_remaining: 0,
        },
        Some(last) => {
            let elapsed = elapsed_days(last, now);
            if elapsed >= DONATION_INTERVAL_DAYS {
                Eligibility {
                    can_donate: true,
                    status: EligibilityStatus::IntervalSatisfied,
                    status_text: "Available".to_string(),
                    message: format!(
                        "Last donation was {} days ago. Eligible to donate.",
                        elapsed
                    ),
                    days_remaining: 0,
                }
            } else {
                let remaining = DONATION_INTERVAL_DAYS - elapsed;
                Eligibility {
                    can_donate: false,
                    status: EligibilityStatus::CoolingDown,
                    status_text: "Not available".to_string(),
                    message: format!(
                        "Can donate again in {} {}.",
                        remaining,
                        day_unit(remaining)
                    ),
                    days_remaining: remaining,
                }
            }
        }
    };

    assert_eligibility_invariants(&eligibility);
    if let Some(last) = last_donation {
        assert_cooling_within_interval(&eligibility, elapsed_days(last, now));
    }
    eligibility
}

/// Evaluate eligibility against the wall clock.
///
/// Batch callers should take `Utc::now()` once and use [`evaluate`] so that
/// every donor in the pass sees the same instant.
pub fn evaluate_now(last_donation: Option<DateTime<Utc>>) -> Eligibility {
    evaluate(last_donation, Utc::now())
}

/// Instant at which the donation interval is satisfied.
///
/// `None` if never donated, or if the date falls outside the representable range.
pub fn next_eligible_date(last_donation: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
    last_donation.and_then(|last| last.checked_add_signed(Duration::days(DONATION_INTERVAL_DAYS)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    fn days_ago(days: i64) -> Option<DateTime<Utc>> {
        Some(now() - Duration::days(days))
    }

    #[test]
    fn test_never_donated() {
        let e = evaluate(None, now());
        assert!(e.can_donate);
        assert_eq!(e.days_remaining, 0);
        assert_eq!(e.status, EligibilityStatus::NeverDonated);
    }

    #[test]
    fn test_long_ago() {
        let e = evaluate(days_ago(200), now());
        assert!(e.can_donate);
        assert_eq!(e.days_remaining, 0);
        assert_eq!(e.status, EligibilityStatus::IntervalSatisfied);
        assert!(e.message.contains("200 days"));
    }

    #[test]
    fn test_exact_boundary() {
        let e = evaluate(days_ago(120), now());
        assert!(e.can_donate);
        assert_eq!(e.days_remaining, 0);
    }

    #[test]
    fn test_one_day_short() {
        let e = evaluate(days_ago(119), now());
        assert!(!e.can_donate);
        assert_eq!(e.days_remaining, 1);
        assert_eq!(e.message, "Can donate again in 1 day.");
    }

    #[test]
    fn test_thirty_days() {
        let e = evaluate(days_ago(30), now());
        assert!(!e.can_donate);
        assert_eq!(e.days_remaining, 90);
        assert_eq!(e.message, "Can donate again in 90 days.");
        assert_eq!(e.status, EligibilityStatus::CoolingDown);
    }

    #[test]
    fn test_donated_today() {
        let e = evaluate(Some(now()), now());
        assert!(!e.can_donate);
        assert_eq!(e.days_remaining, 120);
    }

    #[test]
    fn test_partial_day_rounds_down() {
        // 119 days and 23 hours is still 119 whole days
        let last = now() - Duration::days(120) + Duration::hours(1);
        let e = evaluate(Some(last), now());
        assert!(!e.can_donate);
        assert_eq!(e.days_remaining, 1);
    }

    #[test]
    fn test_future_donation_date() {
        // A clock behind the record yields negative elapsed days
        let last = now() + Duration::days(3);
        assert_eq!(elapsed_days(last, now()), -3);
        let e = evaluate(Some(last), now());
        assert!(!e.can_donate);
        assert_eq!(e.days_remaining, 123);
    }

    #[test]
    fn test_future_by_hours_floors_to_minus_one() {
        let last = now() + Duration::hours(2);
        assert_eq!(elapsed_days(last, now()), -1);
    }

    #[test]
    fn test_future_by_subsecond_floors_to_minus_one() {
        let last = now() + Duration::milliseconds(500);
        assert_eq!(elapsed_days(last, now()), -1);
        let e = evaluate(Some(last), now());
        assert_eq!(e.days_remaining, 121);
    }

    #[test]
    fn test_future_by_day_and_millis_floors_to_minus_two() {
        let last = now() + Duration::days(1) + Duration::milliseconds(500);
        assert_eq!(elapsed_days(last, now()), -2);
    }

    #[test]
    fn test_past_subsecond_is_zero_days() {
        let last = now() - Duration::milliseconds(500);
        assert_eq!(elapsed_days(last, now()), 0);
        let last = now() - Duration::days(1) - Duration::milliseconds(1);
        assert_eq!(elapsed_days(last, now()), 1);
    }

    #[test]
    fn test_cooling_window() {
        for elapsed in 0..DONATION_INTERVAL_DAYS {
            let e = evaluate(days_ago(elapsed), now());
            assert!(!e.can_donate, "elapsed {}", elapsed);
            assert_eq!(e.days_remaining, DONATION_INTERVAL_DAYS - elapsed);
        }
    }

    #[test]
    fn test_eligible_after_interval() {
        for elapsed in DONATION_INTERVAL_DAYS..DONATION_INTERVAL_DAYS + 400 {
            let e = evaluate(days_ago(elapsed), now());
            assert!(e.can_donate, "elapsed {}", elapsed);
            assert_eq!(e.days_remaining, 0);
        }
    }

    #[test]
    fn test_monotonic_over_days() {
        let mut previous = evaluate(days_ago(-10), now());
        for elapsed in -9..300 {
            let current = evaluate(days_ago(elapsed), now());
            assert!(previous.days_remaining - current.days_remaining <= 1);
            assert!(current.days_remaining <= previous.days_remaining);
            if previous.can_donate {
                assert!(current.can_donate);
            }
            previous = current;
        }
    }

    #[test]
    fn test_idempotent() {
        let last = days_ago(45);
        assert_eq!(evaluate(last, now()), evaluate(last, now()));
    }

    #[test]
    fn test_next_eligible_date() {
        assert_eq!(next_eligible_date(None), None);
        let last = now() - Duration::days(10);
        let next = next_eligible_date(Some(last)).unwrap();
        assert_eq!(next, last + Duration::days(120));
        assert!(evaluate(Some(last), next).can_donate);
        assert!(!evaluate(Some(last), next - Duration::seconds(1)).can_donate);
    }

    #[test]
    fn test_next_eligible_date_out_of_range() {
        let far = crate::timestamp::parse_timestamp("+262142-12-01");
        assert!(far.is_some());
        assert_eq!(next_eligible_date(far), None);
        assert_eq!(next_eligible_date(Some(DateTime::<Utc>::MAX_UTC)), None);
    }

    #[test]
    fn test_day_unit() {
        assert_eq!(day_unit(1), "day");
        assert_eq!(day_unit(0), "days");
        assert_eq!(day_unit(2), "days");
    }

    #[test]
    fn test_status_can_donate() {
        assert!(EligibilityStatus::NeverDonated.can_donate());
        assert!(EligibilityStatus::IntervalSatisfied.can_donate());
        assert!(!EligibilityStatus::CoolingDown.can_donate());
    }

    #[test]
    fn test_serializes_camel_case() {
        let e = evaluate(days_ago(30), now());
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["canDonate"], false);
        assert_eq!(json["daysRemaining"], 90);
        assert_eq!(json["status"], "coolingDown");
        assert!(json["statusText"].is_string());
    }
}
