//! Applies a prompt decision: runs the command if asked and records the
//! outcome in the ledger.

use crate::due::Clock;
use crate::entry::EntrySpec;
use crate::error::{NagError, Result};
use crate::ledger::RunLedger;
use crate::prompt::Decision;
use std::path::Path;
use std::process::{Command, Stdio};

// ---------------------------------------------------------------------------
// CommandRunner
// ---------------------------------------------------------------------------

/// Runs an entry's command to completion.
///
/// Returns the exit code (`None` when killed by a signal). Failing to launch
/// at all is an [`NagError::Execution`].
pub trait CommandRunner {
    fn run(&mut self, entry: &EntrySpec) -> Result<Option<i32>>;
}

/// Runs commands through the system shell with inherited stdio.
#[derive(Debug, Default)]
pub struct ShellRunner;

impl ShellRunner {
    #[cfg(windows)]
    const SHELL: (&'static str, &'static str) = ("cmd", "/C");
    #[cfg(not(windows))]
    const SHELL: (&'static str, &'static str) = ("sh", "-c");
}

impl CommandRunner for ShellRunner {
    fn run(&mut self, entry: &EntrySpec) -> Result<Option<i32>> {
        let (shell, flag) = Self::SHELL;
        let launch_err = |reason: String| NagError::Execution {
            name: entry.name.clone(),
            reason,
        };

        let shell_path =
            which::which(shell).map_err(|e| launch_err(format!("shell '{shell}' not found: {e}")))?;

        tracing::debug!(name = %entry.name, command = %entry.command, "launching");
        let status = Command::new(shell_path)
            .arg(flag)
            .arg(&entry.command)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| launch_err(e.to_string()))?;

        Ok(status.code())
    }
}

// ---------------------------------------------------------------------------
// Applying decisions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Command launched and finished; ledger updated.
    Ran { exit_code: Option<i32> },
    /// Nothing run, nothing recorded.
    Kept,
    /// Nothing run; interval restarted.
    Acknowledged,
}

/// Carry out `decision` for `entry`, persisting the ledger immediately when
/// it changes. On a launch failure the ledger is left untouched.
pub fn apply(
    decision: Decision,
    entry: &EntrySpec,
    ledger: &mut RunLedger,
    ledger_path: &Path,
    clock: &dyn Clock,
    runner: &mut dyn CommandRunner,
) -> Result<Outcome> {
    let outcome = match decision {
        Decision::SkipKeep => return Ok(Outcome::Kept),
        Decision::SkipReset => Outcome::Acknowledged,
        Decision::Run => {
            let exit_code = runner.run(entry)?;
            match exit_code {
                Some(0) => {}
                Some(code) => tracing::warn!(name = %entry.name, code, "command exited non-zero"),
                None => tracing::warn!(name = %entry.name, "command terminated by signal"),
            }
            Outcome::Ran { exit_code }
        }
    };

    ledger.set(&entry.name, clock.now());
    ledger.persist(ledger_path)?;
    tracing::info!(name = %entry.name, ?outcome, "recorded last run");
    Ok(outcome)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
