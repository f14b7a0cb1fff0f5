//! In-memory donor directory
//!
//! Holds a donor list fetched from the donor-management API and answers
//! filtered, eligibility-annotated views of it. Every view evaluates all
//! donors against a single `now`.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::instrument;

use crate::eligibility::{self, time_since_donation};
use crate::error::{Error, Result};
use crate::invariants::assert_summary_invariants;
use crate::models::{BloodGroup, DirectoryEntry, DirectorySummary, Donor};

/// Eligibility filter for directory views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Availability {
    #[default]
    Any,
    /// Only donors who may donate now
    Eligible,
    /// Only donors still inside the interval
    Cooling,
}

impl Availability {
    fn matches(&self, can_donate: bool) -> bool {
        match self {
            Availability::Any => true,
            Availability::Eligible => can_donate,
            Availability::Cooling => !can_donate,
        }
    }
}

/// Search criteria; unset fields match everything
#[derive(Debug, Clone, Default)]
pub struct DonorFilter {
    pub blood_group: Option<BloodGroup>,
    /// Case-insensitive substring of district or address
    pub location: Option<String>,
    /// Case-insensitive substring of name, phone, email or district
    pub query: Option<String>,
    pub availability: Availability,
}

impl DonorFilter {
    pub fn blood_group(mut self, group: BloodGroup) -> Self {
        self.blood_group = Some(group);
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn availability(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self
    }

    /// Whether the donor's static fields match (eligibility checked separately)
    fn matches_donor(&self, donor: &Donor) -> bool {
        if let Some(group) = self.blood_group {
            if donor.blood_group != group {
                return false;
            }
        }

        if let Some(location) = non_blank(&self.location) {
            let needle = location.to_lowercase();
            let hit = [&donor.district, &donor.address]
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        if let Some(query) = non_blank(&self.query) {
            let needle = query.to_lowercase();
            let hit = donor.name.to_lowercase().contains(&needle)
                || [&donor.phone, &donor.email, &donor.district]
                    .into_iter()
                    .flatten()
                    .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        true
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DonorPayload {
    List(Vec<serde_json::Value>),
    Wrapped { donors: Vec<serde_json::Value> },
}

/// Donor list with eligibility-aware views
#[derive(Debug, Clone, Default)]
pub struct DonorDirectory {
    donors: Vec<Donor>,
}

impl DonorDirectory {
    pub fn new(donors: Vec<Donor>) -> Self {
        Self { donors }
    }

    /// Parse an API payload: a JSON array of donors, or `{ "donors": [...] }`.
    ///
    /// Records that fail to deserialize are skipped with a warning.
    #[instrument(skip(json), fields(bytes = json.len()))]
    pub fn from_json(json: &str) -> Result<Self> {
        let payload: DonorPayload = serde_json::from_str(json)?;
        let records = match payload {
            DonorPayload::List(records) => records,
            DonorPayload::Wrapped { donors } => donors,
        };

        let total = records.len();
        let donors: Vec<Donor> = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value::<Donor>(value) {
                Ok(donor) => Some(donor),
                Err(e) => {
                    tracing::warn!(index, error = %e, "Skipping malformed donor record");
                    None
                }
            })
            .collect();

        tracing::info!(loaded = donors.len(), skipped = total - donors.len(), "Donor list parsed");
        Ok(Self::new(donors))
    }

    /// Load a donor export from disk
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        if contents.trim().is_empty() {
            return Err(Error::InvalidInput(format!(
                "donor file {} is empty",
                path.as_ref().display()
            )));
        }
        Self::from_json(&contents)
    }

    pub fn donors(&self) -> &[Donor] {
        &self.donors
    }

    pub fn len(&self) -> usize {
        self.donors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.donors.is_empty()
    }

    fn entry(donor: &Donor, now: DateTime<Utc>) -> DirectoryEntry {
        DirectoryEntry {
            donor: donor.clone(),
            eligibility: eligibility::evaluate(donor.last_donation_date, now),
            last_donation_text: time_since_donation(donor.last_donation_date, now),
        }
    }

    /// Evaluate every donor at `now`, in list order
    pub fn evaluate_all(&self, now: DateTime<Utc>) -> Vec<DirectoryEntry> {
        self.donors.iter().map(|d| Self::entry(d, now)).collect()
    }

    /// Donors matching `filter` at `now`, in list order
    #[instrument(skip(self, filter))]
    pub fn search(&self, filter: &DonorFilter, now: DateTime<Utc>) -> Vec<DirectoryEntry> {
        let results: Vec<DirectoryEntry> = self
            .donors
            .iter()
            .filter(|d| filter.matches_donor(d))
            .map(|d| Self::entry(d, now))
            .filter(|e| filter.availability.matches(e.eligibility.can_donate))
            .collect();

        tracing::debug!(matched = results.len(), total = self.donors.len(), "Directory search");
        results
    }

    /// Eligible donors of one blood group at `now`
    pub fn available_donors(&self, group: BloodGroup, now: DateTime<Utc>) -> Vec<DirectoryEntry> {
        let filter = DonorFilter::default()
            .blood_group(group)
            .availability(Availability::Eligible);
        self.search(&filter, now)
    }

    /// Counts over the whole list at `now`
    pub fn summary(&self, now: DateTime<Utc>) -> DirectorySummary {
        Self::summarize(&self.evaluate_all(now))
    }

    /// Counts over an already-evaluated set of entries
    pub fn summarize(entries: &[DirectoryEntry]) -> DirectorySummary {
        let mut summary = DirectorySummary {
            total: entries.len(),
            ..Default::default()
        };

        for entry in entries {
            if entry.eligibility.can_donate {
                summary.eligible += 1;
                *summary
                    .eligible_by_group
                    .entry(entry.donor.blood_group)
                    .or_insert(0) += 1;
            } else {
                summary.cooling_down += 1;
            }
        }

        assert_summary_invariants(&summary);
        summary
    }
}
