use super::{load, Locations};
use crate::output::print_json;
use chrono::Utc;
use nag_core::report::{format_list, statuses};

pub fn run(
    locations: &Locations<'_>,
    name: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let loaded = load(locations, name)?;
    let now = Utc::now();

    if json {
        print_json(&statuses(&loaded.entries, &loaded.ledger, now))?;
    } else {
        for line in format_list(&loaded.entries, &loaded.ledger, now) {
            println!("{line}");
        }
    }
    Ok(())
}
