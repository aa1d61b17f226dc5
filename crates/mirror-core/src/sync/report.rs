//! Per-cycle reporting

use std::fmt;
use std::path::PathBuf;

use mirror_fs::EntryKind;
use serde::Serialize;

/// What happened to one source entry during the copy phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EntryStatus {
    Copied,
    /// Neither a file nor a directory; left out of the mirror
    Skipped,
    Failed { error: String },
}

/// Outcome for one top-level source entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryOutcome {
    pub path: PathBuf,
    pub kind: EntryKind,
    #[serde(flatten)]
    pub status: EntryStatus,
}

impl EntryOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self.status, EntryStatus::Failed { .. })
    }
}

/// A destination entry the clear phase could not remove.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemovalFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Report from one synchronization cycle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    /// Destination entries removed by the clear phase
    pub removed: usize,
    /// Destination entries that resisted removal
    pub removal_failures: Vec<RemovalFailure>,
    /// One outcome per source entry, in listing order
    pub entries: Vec<EntryOutcome>,
    /// Wall-clock duration of the cycle
    pub elapsed_ms: u64,
}

impl CycleReport {
    pub fn copied(&self) -> usize {
        self.count(|s| matches!(s, EntryStatus::Copied))
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, EntryStatus::Skipped))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, EntryStatus::Failed { .. }))
    }

    /// Outcomes of entries that failed to copy.
    pub fn failures(&self) -> impl Iterator<Item = &EntryOutcome> {
        self.entries.iter().filter(|e| e.is_failed())
    }

    /// No copy failures and no removal failures.
    pub fn is_clean(&self) -> bool {
        self.failed() == 0 && self.removal_failures.is_empty()
    }

    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    fn count(&self, pred: impl Fn(&EntryStatus) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(&e.status)).count()
    }
}

impl fmt::Display for CycleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} copied, {} skipped, {} failed, {} removed",
            self.copied(),
            self.skipped(),
            self.failed(),
            self.removed
        )?;
        if !self.removal_failures.is_empty() {
            write!(f, " ({} not removed)", self.removal_failures.len())?;
        }
        write!(f, " in {}ms", self.elapsed_ms)
    }
}
