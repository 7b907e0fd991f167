use crate::error::{NagError, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

// ---------------------------------------------------------------------------
// EntrySpec
// ---------------------------------------------------------------------------

/// One named reminder: a shell command and how often it should run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySpec {
    pub name: String,
    pub command: String,
    pub interval_days: u32,
}

impl EntrySpec {
    pub fn new(name: impl Into<String>, command: impl Into<String>, interval_days: u32) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            interval_days,
        }
    }
}

// ---------------------------------------------------------------------------
// Raw config shape
// ---------------------------------------------------------------------------

/// Interval as written in the config file: `7` or `"7"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawInterval {
    Number(i64),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    name: Option<String>,
    command: Option<String>,
    #[serde(alias = "interval_days")]
    interval: Option<RawInterval>,
}

impl RawEntry {
    fn validate(self, index: usize) -> Result<EntrySpec> {
        let missing = |key: &str| NagError::Config(format!("entry {index}: no {key} specified"));

        let name = self.name.ok_or_else(|| missing("name"))?;
        if name.trim().is_empty() {
            return Err(NagError::Config(format!("entry {index}: name is empty")));
        }
        let command = self.command.ok_or_else(|| missing("command"))?;
        let raw = self.interval.ok_or_else(|| missing("interval"))?;

        let days = match raw {
            RawInterval::Number(n) => n,
            RawInterval::Text(s) => s.trim().parse::<i64>().map_err(|_| {
                NagError::Config(format!("'{name}': interval '{s}' is not a whole number"))
            })?,
        };
        if days < 1 {
            return Err(NagError::Config(format!(
                "'{name}': interval must be at least 1 day, got {days}"
            )));
        }
        let interval_days = u32::try_from(days)
            .map_err(|_| NagError::Config(format!("'{name}': interval {days} is too large")))?;

        Ok(EntrySpec {
            name,
            command,
            interval_days,
        })
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Parse and validate a config document. Order of entries is preserved.
pub fn parse_entries(data: &str) -> Result<Vec<EntrySpec>> {
    let raw: Vec<RawEntry> = serde_json::from_str(data)
        .map_err(|e| NagError::Config(format!("expected a JSON array of entries: {e}")))?;

    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(raw.len());
    for (i, r) in raw.into_iter().enumerate() {
        let entry = r.validate(i)?;
        if !seen.insert(entry.name.clone()) {
            return Err(NagError::Config(format!(
                "duplicate entry name '{}'",
                entry.name
            )));
        }
        entries.push(entry);
    }
    Ok(entries)
}

pub fn load_entries(path: &Path) -> Result<Vec<EntrySpec>> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| NagError::Config(format!("cannot read {}: {e}", path.display())))?;
    parse_entries(&data)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
