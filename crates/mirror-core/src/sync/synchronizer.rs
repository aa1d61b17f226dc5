//! One synchronization cycle
//!
//! A cycle takes the source listing, clears the destination, then copies
//! every source entry into the destination with one concurrent task per
//! top-level entry. Per-entry failures are reported through the sink and
//! never abort the cycle.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use mirror_fs::{
    CopyStats, EntryKind, SourceEntry, TreeSnapshot, copy_entry, ensure_dir, list_entries,
    remove_entry,
};
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};

use super::report::{CycleReport, EntryOutcome, EntryStatus, RemovalFailure};
use crate::Result;
use crate::sink::{Level, LogSink};

/// Runs clear-then-copy cycles from a source root into a destination root.
pub struct Synchronizer {
    sink: Arc<dyn LogSink>,
    /// `None` launches every copy at once
    max_parallel: Option<NonZeroUsize>,
}

/// State handed from the blocking prepare step to the copy fan-out.
struct Prepared {
    entries: Vec<SourceEntry>,
    removed: usize,
    removal_failures: Vec<RemovalFailure>,
}

impl Synchronizer {
    /// Create a synchronizer that reports through `sink`.
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            max_parallel: None,
        }
    }

    /// Bound the number of copy tasks running at the same time.
    pub fn with_max_parallel(mut self, max_parallel: Option<NonZeroUsize>) -> Self {
        self.max_parallel = max_parallel;
        self
    }

    /// Run one full cycle.
    ///
    /// 1. Create `dest_root` (with parents) if missing.
    /// 2. List the immediate entries of `source_root`.
    /// 3. Remove every immediate entry of `dest_root`, best effort.
    /// 4. Copy all source entries concurrently and wait for every copy.
    ///
    /// # Errors
    ///
    /// Returns an error only when the cycle cannot start: the destination
    /// cannot be created or listed, or the source cannot be listed. In that
    /// case nothing has been copied. Individual removal and copy failures
    /// are recorded in the returned [`CycleReport`] instead.
    pub async fn run_cycle(&self, source_root: &Path, dest_root: &Path) -> Result<CycleReport> {
        let started = Instant::now();

        let prepared = {
            let source_root = source_root.to_path_buf();
            let dest_root = dest_root.to_path_buf();
            let sink = Arc::clone(&self.sink);
            tokio::task::spawn_blocking(move || prepare(&source_root, &dest_root, sink.as_ref()))
                .await??
        };

        let entries = self.copy_all(prepared.entries, dest_root).await;
        log_destination_size(dest_root).await;

        let report = CycleReport {
            removed: prepared.removed,
            removal_failures: prepared.removal_failures,
            entries,
            elapsed_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        };
        self.sink
            .accept(Level::Info, &format!("Cycle finished: {report}"));
        Ok(report)
    }

    /// Copy phase: one task per entry, joined before returning.
    async fn copy_all(&self, entries: Vec<SourceEntry>, dest_root: &Path) -> Vec<EntryOutcome> {
        let limiter = self
            .max_parallel
            .map(|n| Arc::new(Semaphore::new(n.get())));
        let mut outcomes: Vec<Option<EntryStatus>> = vec![None; entries.len()];
        let mut tasks = JoinSet::new();
        let mut task_index = HashMap::new();

        for (index, entry) in entries.iter().enumerate() {
            if entry.kind == EntryKind::Other {
                self.sink.accept(
                    Level::Warn,
                    &format!(
                        "Skipped: {} (not a regular file or directory)",
                        entry.path.display()
                    ),
                );
                outcomes[index] = Some(EntryStatus::Skipped);
                continue;
            }

            let entry = entry.clone();
            let dest_root = dest_root.to_path_buf();
            let limiter = limiter.clone();
            let handle = tasks.spawn(async move {
                let _permit = match limiter {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };
                tokio::task::spawn_blocking(move || copy_entry(&entry, &dest_root)).await
            });
            task_index.insert(handle.id(), index);
        }
        tracing::debug!(tasks = tasks.len(), "Copy tasks launched");

        while let Some(joined) = tasks.join_next_with_id().await {
            let (id, result) = match joined {
                Ok((id, result)) => (id, result),
                Err(e) => (e.id(), Err(e)),
            };
            let Some(&index) = task_index.get(&id) else {
                tracing::error!(task = %id, "Copy task finished without a known entry");
                continue;
            };
            outcomes[index] = Some(self.record(&entries[index].path, result));
        }

        entries
            .into_iter()
            .zip(outcomes)
            .map(|(entry, status)| EntryOutcome {
                path: entry.path,
                kind: entry.kind,
                status: status.unwrap_or_else(|| EntryStatus::Failed {
                    error: "copy task did not complete".into(),
                }),
            })
            .collect()
    }

    /// Turn one joined copy into a status and report it through the sink.
    fn record(
        &self,
        path: &Path,
        result: std::result::Result<mirror_fs::Result<CopyStats>, JoinError>,
    ) -> EntryStatus {
        match result {
            Ok(Ok(stats)) => {
                tracing::debug!(
                    path = %path.display(),
                    files = stats.files,
                    bytes = stats.bytes,
                    "Entry copied"
                );
                self.sink
                    .accept(Level::Info, &format!("Copied: {}", path.display()));
                EntryStatus::Copied
            }
            Ok(Err(e)) => self.copy_failed(path, describe(&e)),
            Err(e) => self.copy_failed(path, format!("copy task did not complete: {e}")),
        }
    }

    fn copy_failed(&self, path: &Path, error: String) -> EntryStatus {
        self.sink.accept(
            Level::Error,
            &format!("Failed to copy {}: {}", path.display(), error),
        );
        EntryStatus::Failed { error }
    }
}

/// Debug-level count of everything now below `dest_root`. Skipped unless
/// debug events are enabled, since it walks and hashes the whole tree.
async fn log_destination_size(dest_root: &Path) {
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }
    let root = dest_root.to_path_buf();
    match tokio::task::spawn_blocking(move || TreeSnapshot::capture(&root)).await {
        Ok(Ok(snapshot)) => tracing::debug!(
            dest = %dest_root.display(),
            entries = snapshot.len(),
            "Destination after cycle"
        ),
        Ok(Err(e)) => tracing::debug!(error = %e, "Could not snapshot destination"),
        Err(e) => tracing::debug!(error = %e, "Destination snapshot task failed"),
    }
}

/// Blocking part of a cycle: make sure the destination exists, take the
/// source listing, then clear the destination.
fn prepare(source_root: &Path, dest_root: &Path, sink: &dyn LogSink) -> Result<Prepared> {
    ensure_dir(dest_root)?;
    let entries = list_entries(source_root)?;
    let (removed, removal_failures) = clear(dest_root, sink)?;

    Ok(Prepared {
        entries,
        removed,
        removal_failures,
    })
}

/// Clear phase: remove every immediate entry of `dest_root`, one by one.
fn clear(dest_root: &Path, sink: &dyn LogSink) -> Result<(usize, Vec<RemovalFailure>)> {
    let mut removed = 0;
    let mut failures = Vec::new();

    for entry in list_entries(dest_root)? {
        match remove_entry(&entry.path) {
            Ok(()) => {
                tracing::debug!(path = %entry.path.display(), "Removed stale entry");
                removed += 1;
            }
            Err(e) => {
                let error = describe(&e);
                sink.accept(
                    Level::Error,
                    &format!("Failed to remove {}: {}", entry.path.display(), error),
                );
                failures.push(RemovalFailure {
                    path: entry.path,
                    error,
                });
            }
        }
    }

    Ok((removed, failures))
}

/// Error text without repeating the path the caller already prints.
fn describe(err: &mirror_fs::Error) -> String {
    match err {
        mirror_fs::Error::Io { source, .. } => source.to_string(),
        other => other.to_string(),
    }
}
