use super::{load, Locations};
use crate::output::print_json;
use chrono::Utc;
use nag_core::{nag::check, report::statuses};

/// Returns whether at least one entry is due.
pub fn run(
    locations: &Locations<'_>,
    name: Option<&str>,
    json: bool,
) -> anyhow::Result<bool> {
    let loaded = load(locations, name)?;
    let now = Utc::now();

    if json {
        let reports: Vec<_> = statuses(&loaded.entries, &loaded.ledger, now)
            .into_iter()
            .filter(|r| r.status.is_due)
            .collect();
        let overdue = !reports.is_empty();
        print_json(&serde_json::json!({
            "overdue": overdue,
            "entries": reports,
        }))?;
        return Ok(overdue);
    }

    let overdue = check(&loaded.entries, &loaded.ledger, now);
    if !overdue.is_empty() {
        println!("Due: {}", overdue.join(", "));
    }
    Ok(!overdue.is_empty())
}
