//! Donor model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::BloodGroup;
use crate::eligibility::{self, Eligibility};

/// A registered blood donor, as delivered by the donor-management API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donor {
    #[serde(alias = "_id", default)]
    pub id: String,
    pub name: String,
    pub blood_group: BloodGroup,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, with = "crate::timestamp::lenient")]
    pub last_donation_date: Option<DateTime<Utc>>,
}

impl Donor {
    pub fn new(id: impl Into<String>, name: impl Into<String>, blood_group: BloodGroup) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            blood_group,
            phone: None,
            email: None,
            district: None,
            address: None,
            last_donation_date: None,
        }
    }

    pub fn with_district(mut self, district: impl Into<String>) -> Self {
        self.district = Some(district.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_last_donation(mut self, at: DateTime<Utc>) -> Self {
        self.last_donation_date = Some(at);
        self
    }

    /// Eligibility of this donor at `now`
    pub fn eligibility_at(&self, now: DateTime<Utc>) -> Eligibility {
        eligibility::evaluate(self.last_donation_date, now)
    }

    /// Whether this donor may donate at `now`
    pub fn can_donate_at(&self, now: DateTime<Utc>) -> bool {
        self.eligibility_at(now).can_donate
    }
}
