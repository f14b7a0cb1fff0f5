//! Hemo Core Library
//!
//! Donation eligibility rules, donor models, and the in-memory donor
//! directory for the Hemo blood-donation platform.

pub mod config;
pub mod directory;
pub mod eligibility;
pub mod error;
pub mod invariants;
pub mod models;
pub mod timestamp;

pub use config::{Config, DirectorySettings};
pub use directory::{Availability, DonorDirectory, DonorFilter};
pub use eligibility::{
    day_unit, elapsed_days, evaluate, evaluate_now, humanize_elapsed_days, next_eligible_date,
    time_since_donation, Eligibility, EligibilityStatus, DONATION_INTERVAL_DAYS,
};
pub use error::{Error, Result};
pub use models::*;
pub use timestamp::{parse_timestamp, parse_timestamp_opt};
