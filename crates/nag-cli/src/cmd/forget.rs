use super::{load, Locations};
use nag_core::nag::forget;

pub fn run(locations: &Locations<'_>, name: &str) -> anyhow::Result<()> {
    let mut loaded = load(locations, None)?;
    if forget(&loaded.entries, &mut loaded.ledger, &loaded.ledger_path, name)? {
        println!("Forgot the last run of '{name}'; it is due now");
    } else {
        println!("'{name}' has no recorded run");
    }
    Ok(())
}
