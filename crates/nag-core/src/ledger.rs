//! Persistent record of when each entry last ran.
//!
//! The ledger is loaded once per invocation, mutated in memory as entries are
//! decided and written back after every change. It is never held open between
//! invocations; two concurrent invocations race and the last writer wins.

use crate::error::{NagError, Result};
use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use std::collections::BTreeMap;
use std::path::Path;

/// Timestamp layout written by earlier releases: naive local time.
const LEGACY_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunLedger {
    runs: BTreeMap<String, DateTime<Utc>>,
}

impl RunLedger {
    pub fn new() -> Self {
        Self::default()
    }

    // ---------------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------------

    /// Load the ledger at `path`. A missing file yields an empty ledger.
    pub fn load(path: &Path) -> Result<Self> {
        let data = crate::io::read_if_exists(path).map_err(|e| NagError::storage(path, e))?;
        let Some(data) = data else {
            tracing::debug!(path = %path.display(), "no ledger yet, starting empty");
            return Ok(Self::new());
        };
        Self::parse(&data).map_err(|reason| NagError::storage(path, reason))
    }

    fn parse(data: &str) -> std::result::Result<Self, String> {
        if data.trim().is_empty() {
            return Ok(Self::new());
        }
        let raw: BTreeMap<String, String> = serde_json::from_str(data)
            .map_err(|e| format!("expected an object of name to timestamp: {e}"))?;
        let mut runs = BTreeMap::new();
        for (name, stamp) in raw {
            let at = parse_timestamp(&stamp)
                .ok_or_else(|| format!("unreadable timestamp '{stamp}' for '{name}'"))?;
            runs.insert(name, at);
        }
        Ok(Self { runs })
    }

    /// Write the full map back to `path`, replacing the file atomically.
    pub fn persist(&self, path: &Path) -> Result<()> {
        let raw: BTreeMap<&str, String> = self
            .runs
            .iter()
            .map(|(name, at)| (name.as_str(), at.to_rfc3339_opts(SecondsFormat::AutoSi, true)))
            .collect();
        let data = serde_json::to_string_pretty(&raw)?;
        crate::io::atomic_write(path, data.as_bytes())?;
        tracing::debug!(path = %path.display(), entries = self.runs.len(), "ledger persisted");
        Ok(())
    }

    // ---------------------------------------------------------------------------
    // Access
    // ---------------------------------------------------------------------------

    pub fn get(&self, name: &str) -> Option<DateTime<Utc>> {
        self.runs.get(name).copied()
    }

    pub fn set(&mut self, name: &str, at: DateTime<Utc>) {
        self.runs.insert(name.to_string(), at);
    }

    /// Forget the entry, so it is treated as never run. Returns whether a
    /// timestamp was present.
    pub fn reset(&mut self, name: &str) -> bool {
        self.runs.remove(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(s) {
        return Some(at.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(s, LEGACY_FORMAT).ok()?;
    tracing::debug!(stamp = s, "reading legacy local timestamp");
    let at = match Local.from_local_datetime(&naive).earliest() {
        Some(local) => local.with_timezone(&Utc),
        // Skipped by a DST transition; close enough for day-level arithmetic.
        None => Utc.from_utc_datetime(&naive),
    };
    Some(at)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
