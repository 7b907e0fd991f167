//! Mode dispatch: the nag loop, `--check`, `--forget` and entry selection.
//! `--list` is pure reporting and lives in [`crate::report`].

use crate::due::{evaluate, Clock};
use crate::entry::EntrySpec;
use crate::error::{NagError, Result};
use crate::executor::{apply, CommandRunner, Outcome};
use crate::ledger::RunLedger;
use crate::prompt::{Decision, Prompter};
use crate::report::{format_nag_prompt, KEEP_ACK};
use chrono::{DateTime, Utc};
use std::io::{BufRead, Write};
use std::path::Path;

/// Restrict `entries` to the one called `name`, if given.
pub fn select(entries: Vec<EntrySpec>, name: Option<&str>) -> Result<Vec<EntrySpec>> {
    let Some(name) = name else {
        return Ok(entries);
    };
    entries
        .into_iter()
        .find(|e| e.name == name)
        .map(|e| vec![e])
        .ok_or_else(|| NagError::EntryNotFound(name.to_string()))
}

/// Names of the entries that are due, in config order.
pub fn check(entries: &[EntrySpec], ledger: &RunLedger, now: DateTime<Utc>) -> Vec<String> {
    entries
        .iter()
        .filter(|e| evaluate(e, ledger.get(&e.name), now).is_due)
        .map(|e| e.name.clone())
        .collect()
}

/// Drop `name` from the ledger so it nags as never run. Returns whether a
/// timestamp was removed.
pub fn forget(
    entries: &[EntrySpec],
    ledger: &mut RunLedger,
    ledger_path: &Path,
    name: &str,
) -> Result<bool> {
    if !entries.iter().any(|e| e.name == name) {
        return Err(NagError::EntryNotFound(name.to_string()));
    }
    let removed = ledger.reset(name);
    if removed {
        ledger.persist(ledger_path)?;
    }
    Ok(removed)
}

// ---------------------------------------------------------------------------
// Nag loop
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct NagSummary {
    pub ran: Vec<String>,
    pub acknowledged: Vec<String>,
    pub kept: Vec<String>,
    /// Entries whose command could not be launched; still due.
    pub failed: Vec<NagError>,
}

impl NagSummary {
    pub fn prompted(&self) -> usize {
        self.ran.len() + self.acknowledged.len() + self.kept.len() + self.failed.len()
    }
}

/// Prompt for every due entry in order and apply each decision before moving
/// to the next. Launch failures are passed to `on_failure` as they happen,
/// collected, and do not stop the loop; storage failures abort it.
pub fn run_nag<R: BufRead, W: Write>(
    entries: &[EntrySpec],
    ledger: &mut RunLedger,
    ledger_path: &Path,
    prompter: &mut Prompter<R, W>,
    runner: &mut dyn CommandRunner,
    clock: &dyn Clock,
    on_failure: &mut dyn FnMut(&NagError),
) -> Result<NagSummary> {
    let mut summary = NagSummary::default();

    for entry in entries {
        let status = evaluate(entry, ledger.get(&entry.name), clock.now());
        if !status.is_due {
            tracing::debug!(
                name = %entry.name,
                next_run_in_days = status.next_run_in_days,
                "not due"
            );
            continue;
        }

        let decision = prompter.ask(&format_nag_prompt(entry, &status))?;
        if decision == Decision::SkipKeep {
            writeln!(prompter.output_mut(), "{KEEP_ACK}")?;
        }

        match apply(decision, entry, ledger, ledger_path, clock, runner) {
            Ok(Outcome::Ran { .. }) => summary.ran.push(entry.name.clone()),
            Ok(Outcome::Acknowledged) => summary.acknowledged.push(entry.name.clone()),
            Ok(Outcome::Kept) => summary.kept.push(entry.name.clone()),
            Err(e) if e.is_per_entry() => {
                tracing::debug!(name = %entry.name, "launch failed, entry stays due");
                on_failure(&e);
                summary.failed.push(e);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(summary)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use std::io::Cursor;
    use tempfile::TempDir;

    struct Fixed(DateTime<Utc>);

    impl Clock for Fixed {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    /// Records commands; launching any command listed in `broken` fails.
    #[derive(Default)]
    struct FakeShell {
        ran: Vec<String>,
        broken: Vec<String>,
    }

    impl CommandRunner for FakeShell {
        fn run(&mut self, entry: &EntrySpec) -> Result<Option<i32>> {
            if self.broken.contains(&entry.name) {
                return Err(NagError::Execution {
                    name: entry.name.clone(),
                    reason: "spawn failed".into(),
                });
            }
            self.ran.push(entry.name.clone());
            Ok(Some(0))
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()
    }

    fn entries() -> Vec<EntrySpec> {
        vec![
            EntrySpec::new("updates", "pacman -Syu", 1),
            EntrySpec::new("backup", "restic backup", 7),
            EntrySpec::new("fsck", "fsck -n /", 31),
        ]
    }

    fn nag(
        entries: &[EntrySpec],
        ledger: &mut RunLedger,
        path: &Path,
        script: &str,
        shell: &mut FakeShell,
    ) -> (NagSummary, String) {
        let mut out = Vec::new();
        let summary = {
            let mut prompter = Prompter::new(Cursor::new(script.as_bytes().to_vec()), &mut out);
            run_nag(
                entries,
                ledger,
                path,
                &mut prompter,
                shell,
                &Fixed(t0()),
                &mut |_: &NagError| {},
            )
            .unwrap()
        };
        (summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn select_by_name() {
        let picked = select(entries(), Some("backup")).unwrap();
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].name, "backup");
        assert_eq!(select(entries(), None).unwrap().len(), 3);
    }

    #[test]
    fn select_missing_name_fails() {
        let err = select(entries(), Some("missing")).unwrap_err();
        assert!(matches!(err, NagError::EntryNotFound(ref n) if n == "missing"));
    }

    #[test]
    fn check_reports_only_due_entries() {
        let mut ledger = RunLedger::new();
        ledger.set("updates", t0() - Duration::days(2));
        ledger.set("backup", t0() - Duration::days(1));
        ledger.set("fsck", t0() - Duration::days(10));
        assert_eq!(check(&entries(), &ledger, t0()), vec!["updates".to_string()]);

        ledger.set("updates", t0());
        assert!(check(&entries(), &ledger, t0()).is_empty());
    }

    #[test]
    fn only_due_entries_are_prompted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("last_run.json");
        let mut ledger = RunLedger::new();
        ledger.set("backup", t0() - Duration::days(3));
        let mut shell = FakeShell::default();

        let (summary, out) = nag(&entries(), &mut ledger, &path, "y\nd\n", &mut shell);

        assert_eq!(summary.ran, vec!["updates".to_string()]);
        assert_eq!(summary.acknowledged, vec!["fsck".to_string()]);
        assert_eq!(summary.prompted(), 2);
        assert!(!out.contains("backup"));
        assert_eq!(shell.ran, vec!["updates".to_string()]);
    }

    #[test]
    fn skip_reset_then_recheck_is_not_due() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("last_run.json");
        let list = vec![EntrySpec::new("updates", "x", 5)];
        let mut ledger = RunLedger::new();

        nag(&list, &mut ledger, &path, "d\n", &mut FakeShell::default());

        let reloaded = RunLedger::load(&path).unwrap();
        let status = evaluate(&list[0], reloaded.get("updates"), t0());
        assert!(!status.is_due);
        assert_eq!(status.next_run_in_days, 5);
    }

    #[test]
    fn skip_keep_then_recheck_is_still_due() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("last_run.json");
        let list = vec![EntrySpec::new("updates", "x", 5)];
        let mut ledger = RunLedger::new();

        let (summary, out) = nag(&list, &mut ledger, &path, "n\n", &mut FakeShell::default());

        assert_eq!(summary.kept, vec!["updates".to_string()]);
        assert!(out.contains(KEEP_ACK));
        assert!(check(&list, &RunLedger::load(&path).unwrap(), t0()).contains(&"updates".into()));
    }

    #[test]
    fn launch_failure_does_not_stop_the_queue() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("last_run.json");
        let mut ledger = RunLedger::new();
        let mut shell = FakeShell {
            broken: vec!["updates".into()],
            ..Default::default()
        };

        let (summary, _) = nag(&entries(), &mut ledger, &path, "y\ny\ny\n", &mut shell);

        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.ran, vec!["backup".to_string(), "fsck".to_string()]);
        let saved = RunLedger::load(&path).unwrap();
        assert!(saved.get("updates").is_none());
        assert_eq!(saved.get("backup"), Some(t0()));
    }

    #[test]
    fn launch_failures_are_reported_as_they_happen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("last_run.json");
        let mut ledger = RunLedger::new();
        let mut shell = FakeShell {
            broken: vec!["updates".into(), "fsck".into()],
            ..Default::default()
        };
        let mut reported = Vec::new();
        let mut out = Vec::new();

        let summary = {
            let mut prompter = Prompter::new(Cursor::new(b"y\ny\ny\n".to_vec()), &mut out);
            run_nag(
                &entries(),
                &mut ledger,
                &path,
                &mut prompter,
                &mut shell,
                &Fixed(t0()),
                &mut |e: &NagError| reported.push(e.to_string()),
            )
            .unwrap()
        };

        assert_eq!(summary.failed.len(), 2);
        assert_eq!(
            reported,
            vec![
                "could not launch command for 'updates': spawn failed".to_string(),
                "could not launch command for 'fsck': spawn failed".to_string(),
            ]
        );
    }

    #[test]
    fn earlier_decisions_survive_on_disk_mid_loop() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("last_run.json");
        let mut ledger = RunLedger::new();

        // Input ends after the first answer; the rest default to keep.
        let (summary, _) = nag(&entries(), &mut ledger, &path, "d\n", &mut FakeShell::default());

        assert_eq!(summary.acknowledged, vec!["updates".to_string()]);
        assert_eq!(summary.kept.len(), 2);
        assert_eq!(RunLedger::load(&path).unwrap().len(), 1);
    }

    #[test]
    fn forget_makes_entry_never_run() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("last_run.json");
        let mut ledger = RunLedger::new();
        ledger.set("backup", t0());
        ledger.persist(&path).unwrap();

        assert!(forget(&entries(), &mut ledger, &path, "backup").unwrap());
        assert!(RunLedger::load(&path).unwrap().get("backup").is_none());
        assert!(!forget(&entries(), &mut ledger, &path, "backup").unwrap());
        assert!(matches!(
            forget(&entries(), &mut ledger, &path, "nope"),
            Err(NagError::EntryNotFound(_))
        ));
    }
}
