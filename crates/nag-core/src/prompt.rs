//! The y/n/d/? decision loop offered for each due entry.

use crate::error::Result;
use crate::report::{HELP_TEXT, INVALID_RESPONSE};
use std::io::{BufRead, Write};

/// Terminal outcome of a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Run the command now.
    Run,
    /// Leave the entry overdue; nag again next invocation.
    SkipKeep,
    /// Don't run, but restart the interval as if it had run.
    SkipReset,
}

/// Result of feeding one line to the state machine from `ASK`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Decided(Decision),
    Help,
    Invalid,
}

/// Transition from `ASK` on one line of input. Case-insensitive; surrounding
/// whitespace ignored; an empty line takes the default.
pub fn step(input: &str) -> Step {
    match input.trim().to_ascii_lowercase().as_str() {
        "" | "y" => Step::Decided(Decision::Run),
        "n" => Step::Decided(Decision::SkipKeep),
        "d" => Step::Decided(Decision::SkipReset),
        "?" => Step::Help,
        _ => Step::Invalid,
    }
}

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output_mut(&mut self) -> &mut W {
        &mut self.output
    }

    /// Show `prompt` until a terminal decision is read. Blocks on input.
    /// Closed input ends the loop as [`Decision::SkipKeep`].
    pub fn ask(&mut self, prompt: &str) -> Result<Decision> {
        loop {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                tracing::debug!("input closed, leaving entry overdue");
                return Ok(Decision::SkipKeep);
            }

            match step(&line) {
                Step::Decided(d) => return Ok(d),
                Step::Help => writeln!(self.output, "\n{HELP_TEXT}\n")?,
                Step::Invalid => writeln!(self.output, "{INVALID_RESPONSE}")?,
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ask_with(script: &str) -> (Decision, String) {
        let mut out = Vec::new();
        let decision = {
            let mut p = Prompter::new(Cursor::new(script.as_bytes().to_vec()), &mut out);
            p.ask("Run now? ").unwrap()
        };
        (decision, String::from_utf8(out).unwrap())
    }

    #[test]
    fn step_table() {
        assert_eq!(step("y\n"), Step::Decided(Decision::Run));
        assert_eq!(step("Y"), Step::Decided(Decision::Run));
        assert_eq!(step("\n"), Step::Decided(Decision::Run));
        assert_eq!(step("n"), Step::Decided(Decision::SkipKeep));
        assert_eq!(step(" D \n"), Step::Decided(Decision::SkipReset));
        assert_eq!(step("?"), Step::Help);
        assert_eq!(step("yes"), Step::Invalid);
        assert_eq!(step("x"), Step::Invalid);
    }

    #[test]
    fn empty_line_defaults_to_run() {
        let (d, out) = ask_with("\n");
        assert_eq!(d, Decision::Run);
        assert_eq!(out.matches("Run now?").count(), 1);
    }

    #[test]
    fn help_then_decision() {
        let (d, out) = ask_with("?\nd\n");
        assert_eq!(d, Decision::SkipReset);
        assert!(out.contains("Possible responses are"));
        assert_eq!(out.matches("Run now?").count(), 2);
    }

    #[test]
    fn invalid_input_reprompts() {
        let (d, out) = ask_with("maybe\nq\nn\n");
        assert_eq!(d, Decision::SkipKeep);
        assert_eq!(out.matches(INVALID_RESPONSE).count(), 2);
        assert_eq!(out.matches("Run now?").count(), 3);
    }

    #[test]
    fn closed_input_keeps_entry_overdue() {
        let (d, _) = ask_with("?\n");
        assert_eq!(d, Decision::SkipKeep);
    }
}
