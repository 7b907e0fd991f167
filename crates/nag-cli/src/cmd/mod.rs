pub mod check;
pub mod forget;
pub mod list;
pub mod nag;

use anyhow::Context;
use nag_core::{entry, ledger::RunLedger, nag::select, paths, EntrySpec};
use std::path::{Path, PathBuf};

/// Explicit locations from the command line or environment.
pub struct Locations<'a> {
    pub config: Option<&'a Path>,
    pub last_run: Option<&'a Path>,
}

/// Everything a mode needs: the selected entries and the ledger with its path.
pub struct Loaded {
    pub entries: Vec<EntrySpec>,
    pub ledger: RunLedger,
    pub ledger_path: PathBuf,
}

pub fn load(locations: &Locations<'_>, name: Option<&str>) -> anyhow::Result<Loaded> {
    let config_path = paths::resolve_config_path(locations.config)?;
    let entries = entry::load_entries(&config_path)
        .with_context(|| format!("failed to load config {}", config_path.display()))?;
    let entries = select(entries, name)?;

    let ledger_path = paths::resolve_last_run_path(locations.last_run)?;
    let ledger = RunLedger::load(&ledger_path)?;
    tracing::debug!(
        config = %config_path.display(),
        ledger = %ledger_path.display(),
        entries = entries.len(),
        "loaded"
    );

    Ok(Loaded {
        entries,
        ledger,
        ledger_path,
    })
}
