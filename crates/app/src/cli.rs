//! Command-line arguments

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Parser;
use hemo_core::{parse_timestamp, Availability, BloodGroup, Config, DonorFilter, Error, Result};

/// Donor eligibility report
#[derive(Parser, Debug)]
#[command(name = "hemo", author, version, about)]
pub struct Args {
    /// Config file (defaults to the platform config directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Donor export (JSON); overrides `donors_file` from the config
    #[arg(long)]
    pub donors: Option<PathBuf>,

    /// Only this blood group, e.g. "O-"
    #[arg(long, value_parser = parse_blood_group)]
    pub blood_group: Option<BloodGroup>,

    /// District or address substring
    #[arg(long)]
    pub location: Option<String>,

    /// Name, phone, email or district substring
    #[arg(long)]
    pub query: Option<String>,

    /// Only donors who may donate now
    #[arg(long, conflicts_with = "cooling_only")]
    pub eligible_only: bool,

    /// Only donors still inside the donation interval
    #[arg(long)]
    pub cooling_only: bool,

    /// Evaluation instant (RFC 3339 or YYYY-MM-DD); defaults to now
    #[arg(long)]
    pub at: Option<String>,

    /// Print matching entries as JSON
    #[arg(long)]
    pub json: bool,
}

fn parse_blood_group(s: &str) -> std::result::Result<BloodGroup, String> {
    s.parse().map_err(|e: Error| e.to_string())
}

impl Args {
    /// Build the directory filter, falling back to the configured location
    pub fn filter(&self, config: &Config) -> DonorFilter {
        let availability = if self.eligible_only {
            Availability::Eligible
        } else if self.cooling_only {
            Availability::Cooling
        } else {
            Availability::Any
        };

        DonorFilter {
            blood_group: self.blood_group,
            location: self
                .location
                .clone()
                .or_else(|| config.directory.default_location.clone()),
            query: self.query.clone(),
            availability,
        }
    }

    /// Donor file from the arguments or the config
    pub fn donors_path(&self, config: &Config) -> Result<PathBuf> {
        self.donors
            .clone()
            .or_else(|| config.donors_file.clone())
            .ok_or_else(|| {
                Error::Config("no donor file given (use --donors or set donors_file)".to_string())
            })
    }

    /// Evaluation instant; an unreadable `--at` is an error, not "now"
    pub fn evaluation_instant(&self) -> Result<DateTime<Utc>> {
        match &self.at {
            Some(raw) => parse_timestamp(raw)
                .ok_or_else(|| Error::InvalidInput(format!("cannot parse --at {:?}", raw))),
            None => Ok(Utc::now()),
        }
    }
}
