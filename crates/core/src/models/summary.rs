//! Directory view models

use std::collections::BTreeMap;

use serde::Serialize;

use super::{BloodGroup, Donor};
use crate::eligibility::Eligibility;

/// A donor together with its eligibility at the directory's evaluation instant
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryEntry {
    pub donor: Donor,
    pub eligibility: Eligibility,
    /// "today", "2 months 5 days ago", "never donated"
    pub last_donation_text: String,
}

/// Aggregate counts over a donor list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectorySummary {
    pub total: usize,
    pub eligible: usize,
    pub cooling_down: usize,
    pub eligible_by_group: BTreeMap<BloodGroup, usize>,
}
