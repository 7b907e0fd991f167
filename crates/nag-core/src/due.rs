use crate::entry::EntrySpec;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Elapsed days reported for an entry that has never run. Larger than any
/// configurable interval.
pub const NEVER_ELAPSED: u64 = u64::MAX;

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Source of "now" for the nag loop. Due evaluation itself never reads the
/// clock; callers pass the instant in.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

// ---------------------------------------------------------------------------
// DueStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DueStatus {
    pub last_run: Option<DateTime<Utc>>,
    /// `null` in JSON when never run.
    #[serde(serialize_with = "serialize_elapsed")]
    pub elapsed_days: u64,
    pub is_due: bool,
    pub next_run_in_days: u64,
}

fn serialize_elapsed<S: serde::Serializer>(days: &u64, s: S) -> Result<S::Ok, S::Error> {
    if *days == NEVER_ELAPSED {
        s.serialize_none()
    } else {
        s.serialize_u64(*days)
    }
}

impl DueStatus {
    pub fn never_run(&self) -> bool {
        self.last_run.is_none()
    }
}

/// Evaluate an entry against its last run.
///
/// Days are rolling 24-hour windows, floored. A last run stamped in the
/// future (clock skew) counts as zero days elapsed.
pub fn evaluate(
    entry: &EntrySpec,
    last_run: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> DueStatus {
    let interval = u64::from(entry.interval_days);
    let Some(at) = last_run else {
        return DueStatus {
            last_run: None,
            elapsed_days: NEVER_ELAPSED,
            is_due: true,
            next_run_in_days: 0,
        };
    };

    let elapsed_days = u64::try_from((now - at).num_days()).unwrap_or(0);
    DueStatus {
        last_run: Some(at),
        elapsed_days,
        is_due: elapsed_days >= interval,
        next_run_in_days: interval.saturating_sub(elapsed_days),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
