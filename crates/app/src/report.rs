//! Plain-text and JSON rendering of directory results

use hemo_core::{day_unit, DirectoryEntry, DirectorySummary, Result};

/// One line per donor: name, group, district, status, last donation
pub fn render_entry(entry: &DirectoryEntry) -> String {
    let donor = &entry.donor;
    let status = if entry.eligibility.can_donate {
        entry.eligibility.status_text.clone()
    } else {
        format!(
            "{} ({} {} left)",
            entry.eligibility.status_text,
            entry.eligibility.days_remaining,
            day_unit(entry.eligibility.days_remaining)
        )
    };

    format!(
        "{:<24} {:<4} {:<16} {:<28} {}",
        donor.name,
        donor.blood_group.as_str(),
        donor.district.as_deref().unwrap_or("-"),
        status,
        entry.last_donation_text
    )
}

/// Summary footer
pub fn render_summary(summary: &DirectorySummary) -> String {
    let mut out = format!(
        "{} donors, {} available, {} cooling down",
        summary.total, summary.eligible, summary.cooling_down
    );

    if !summary.eligible_by_group.is_empty() {
        let groups: Vec<String> = summary
            .eligible_by_group
            .iter()
            .map(|(group, count)| format!("{} {}", group, count))
            .collect();
        out.push_str(&format!("\navailable by group: {}", groups.join(", ")));
    }

    out
}

/// Full text report
pub fn render_text(entries: &[DirectoryEntry], summary: &DirectorySummary) -> String {
    let mut out = String::new();
    if entries.is_empty() {
        out.push_str("No matching donors.\n");
    }
    for entry in entries {
        out.push_str(&render_entry(entry));
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&render_summary(summary));
    out.push('\n');
    out
}

/// JSON report: `{ "entries": [...], "summary": {...} }`
pub fn render_json(entries: &[DirectoryEntry], summary: &DirectorySummary) -> Result<String> {
    let value = serde_json::json!({
        "entries": entries,
        "summary": summary,
    });
    Ok(serde_json::to_string_pretty(&value)?)
}
