use crate::due::{evaluate, DueStatus};
use crate::entry::EntrySpec;
use crate::ledger::RunLedger;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const PROMPT_OPTIONS: &str = "Y/n/d/?";

pub const HELP_TEXT: &str = "\
Possible responses are:
    y: Run the command (default)
    n: Do not run the command, but still nag me next time
    d: Don't run the command this time and reset the interval. Useful if
       you've run the command outside of nag-runner recently
    ?: Show this help message";

pub const INVALID_RESPONSE: &str = "Please answer y, n, d or ? for help.";

pub const KEEP_ACK: &str = "Ok, I'll nag you next time.";

/// Status of one entry, as printed by `--list --json` and `--check --json`.
#[derive(Debug, Clone, Serialize)]
pub struct EntryReport {
    pub name: String,
    pub interval_days: u32,
    #[serde(flatten)]
    pub status: DueStatus,
}

/// Evaluate every entry, preserving input order.
pub fn statuses(
    entries: &[EntrySpec],
    ledger: &RunLedger,
    now: DateTime<Utc>,
) -> Vec<EntryReport> {
    entries
        .iter()
        .map(|e| EntryReport {
            name: e.name.clone(),
            interval_days: e.interval_days,
            status: evaluate(e, ledger.get(&e.name), now),
        })
        .collect()
}

/// One `<name>: Next run in <n> days` line per entry, in input order.
pub fn format_list(
    entries: &[EntrySpec],
    ledger: &RunLedger,
    now: DateTime<Utc>,
) -> Vec<String> {
    statuses(entries, ledger, now)
        .iter()
        .map(|r| format!("{}: Next run in {} days", r.name, r.status.next_run_in_days))
        .collect()
}

pub fn format_nag_prompt(entry: &EntrySpec, status: &DueStatus) -> String {
    if status.never_run() {
        format!(
            "You've never run \"{}\". Run now? [{PROMPT_OPTIONS}] ",
            entry.name
        )
    } else {
        format!(
            "It has been {} days since you've run \"{}\". Run now? [{PROMPT_OPTIONS}] ",
            status.elapsed_days, entry.name
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
