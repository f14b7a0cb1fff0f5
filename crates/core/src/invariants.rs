//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible states during development.
//! These checks are compiled out in release builds.

use crate::eligibility::{Eligibility, EligibilityStatus, DONATION_INTERVAL_DAYS};
use crate::models::DirectorySummary;

/// Validate that an eligibility result is internally consistent
pub fn assert_eligibility_invariants(eligibility: &Eligibility) {
    debug_assert!(
        eligibility.can_donate == eligibility.status.can_donate(),
        "can_donate {} disagrees with status {:?}",
        eligibility.can_donate,
        eligibility.status
    );

    // Eligible donors have nothing left to wait for
    debug_assert!(
        !eligibility.can_donate || eligibility.days_remaining == 0,
        "Eligible donor reports {} days remaining",
        eligibility.days_remaining
    );

    debug_assert!(
        eligibility.can_donate || eligibility.days_remaining > 0,
        "Cooling-down donor reports {} days remaining",
        eligibility.days_remaining
    );
}

/// Validate that directory counts add up
pub fn assert_summary_invariants(summary: &DirectorySummary) {
    debug_assert!(
        summary.eligible + summary.cooling_down == summary.total,
        "Summary counts {} eligible + {} cooling != {} total",
        summary.eligible,
        summary.cooling_down,
        summary.total
    );

    let by_group: usize = summary.eligible_by_group.values().sum();
    debug_assert!(
        by_group == summary.eligible,
        "Per-group eligible counts sum to {}, expected {}",
        by_group,
        summary.eligible
    );
}

/// Validate that a cooling-down result stays within the interval
pub fn assert_cooling_within_interval(eligibility: &Eligibility, elapsed_days: i64) {
    if eligibility.status == EligibilityStatus::CoolingDown && elapsed_days >= 0 {
        debug_assert!(
            eligibility.days_remaining <= DONATION_INTERVAL_DAYS,
            "Donor {} days out reports {} days remaining",
            elapsed_days,
            eligibility.days_remaining
        );
    }
}
