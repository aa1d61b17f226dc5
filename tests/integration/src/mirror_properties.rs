//! Whole-system mirroring properties
//!
//! Each test drives the public `mirror_core` API against real temporary
//! directories and compares trees through `TreeSnapshot`.

use std::fs;
use std::sync::Arc;
use std::time::Duration;

use mirror_core::{
    Error, EntryStatus, Level, RecordingSink, Scheduler, SyncConfig, Synchronizer,
};
use mirror_fs::{EntryKind, SnapshotNode, TreeSnapshot};
use mirror_test_utils::MirrorPair;

fn synchronizer() -> (Synchronizer, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::new());
    (Synchronizer::new(sink.clone()), sink)
}

fn assert_mirrored(pair: &MirrorPair) {
    let source = TreeSnapshot::capture(&pair.source()).unwrap();
    let output = TreeSnapshot::capture(&pair.output()).unwrap();
    assert_eq!(source, output, "output differs from source:\n{source}\n---\n{output}");
}

// =============================================================================
// Full replace
// =============================================================================

#[tokio::test]
async fn output_matches_source_after_one_cycle() {
    let pair = MirrorPair::new();
    pair.populate_nested();
    let (sync, _) = synchronizer();

    let report = sync.run_cycle(&pair.source(), &pair.output()).await.unwrap();

    assert!(report.is_clean());
    assert_mirrored(&pair);
}

#[tokio::test]
async fn stale_output_content_is_gone_after_cycle() {
    let pair = MirrorPair::new();
    pair.populate_nested();
    pair.write_output("stale.txt", "old");
    pair.write_output("docs/removed.md", "old doc");
    pair.write_output("orphan/deep/file.bin", "x");
    let (sync, _) = synchronizer();

    let report = sync.run_cycle(&pair.source(), &pair.output()).await.unwrap();

    assert_eq!(report.removed, 3);
    assert_mirrored(&pair);
    pair.tree.assert_file_not_exists("source_copy/docs/removed.md");
    pair.tree.assert_file_not_exists("source_copy/orphan");
}

#[tokio::test]
async fn repeated_cycles_are_idempotent() {
    let pair = MirrorPair::new();
    pair.populate_nested();
    let (sync, _) = synchronizer();

    sync.run_cycle(&pair.source(), &pair.output()).await.unwrap();
    let first = TreeSnapshot::capture(&pair.output()).unwrap();
    let report = sync.run_cycle(&pair.source(), &pair.output()).await.unwrap();
    let second = TreeSnapshot::capture(&pair.output()).unwrap();

    assert_eq!(first, second);
    assert_eq!(report.removed, 3);
    assert_eq!(report.copied(), 3);
}

// =============================================================================
// Structure
// =============================================================================

#[tokio::test]
async fn nested_directories_are_copied_recursively() {
    let pair = MirrorPair::new();
    pair.populate_nested();
    let (sync, _) = synchronizer();

    sync.run_cycle(&pair.source(), &pair.output()).await.unwrap();

    let output = TreeSnapshot::capture(&pair.output()).unwrap();
    assert_eq!(output.get("docs/api/v1/empty"), Some(&SnapshotNode::Dir));
    assert!(matches!(
        output.get("docs/api/v1/endpoints.json"),
        Some(SnapshotNode::File { .. })
    ));
    pair.tree
        .assert_file_contains("source_copy/docs/api/v1/endpoints.json", "/items");
}

#[tokio::test]
async fn empty_source_yields_empty_output() {
    let pair = MirrorPair::new();
    pair.write_output("leftover.txt", "x");
    let (sync, sink) = synchronizer();

    let report = sync.run_cycle(&pair.source(), &pair.output()).await.unwrap();

    assert!(report.entries.is_empty());
    assert!(pair.tree.children("source_copy").is_empty());
    assert!(sink.messages_at(Level::Error).is_empty());
}

#[tokio::test]
async fn missing_output_is_created_with_parents() {
    let pair = MirrorPair::new();
    pair.write_source("a.txt", "a");
    let output = pair.tree.path("deep/er/mirror");
    let (sync, _) = synchronizer();

    sync.run_cycle(&pair.source(), &output).await.unwrap();

    pair.tree.assert_file_contains("deep/er/mirror/a.txt", "a");
}

#[tokio::test]
async fn report_lists_entries_in_name_order() {
    let pair = MirrorPair::new();
    pair.populate_nested();
    let (sync, _) = synchronizer();

    let report = sync.run_cycle(&pair.source(), &pair.output()).await.unwrap();

    let kinds: Vec<(String, EntryKind)> = report
        .entries
        .iter()
        .map(|e| (e.path.file_name().unwrap().to_string_lossy().into_owned(), e.kind))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("docs".to_string(), EntryKind::Directory),
            ("media".to_string(), EntryKind::Directory),
            ("top.txt".to_string(), EntryKind::File),
        ]
    );
}

// =============================================================================
// Failure isolation
// =============================================================================

#[cfg(unix)]
#[tokio::test]
async fn one_failing_entry_does_not_stop_the_others() {
    let pair = MirrorPair::new();
    pair.write_source("good.txt", "good");
    pair.write_source("other/ok.txt", "ok");
    pair.tree.mkdir("source/bad");
    std::os::unix::fs::symlink(
        pair.tree.path("does-not-exist"),
        pair.source().join("bad/broken"),
    )
    .unwrap();
    let (sync, sink) = synchronizer();

    let report = sync.run_cycle(&pair.source(), &pair.output()).await.unwrap();

    assert_eq!(report.copied(), 2);
    assert_eq!(report.failed(), 1);
    let failed = report.failures().next().unwrap();
    assert!(failed.path.ends_with("bad"));
    assert!(matches!(failed.status, EntryStatus::Failed { .. }));
    pair.tree.assert_file_contains("source_copy/good.txt", "good");
    pair.tree.assert_file_contains("source_copy/other/ok.txt", "ok");

    let errors = sink.messages_at(Level::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Failed to copy"));
}

#[tokio::test]
async fn missing_source_leaves_output_untouched() {
    let pair = MirrorPair::new();
    pair.write_output("keep.txt", "keep");
    let (sync, _) = synchronizer();

    let result = sync
        .run_cycle(&pair.tree.path("gone"), &pair.output())
        .await;

    assert!(result.is_err());
    pair.tree.assert_file_contains("source_copy/keep.txt", "keep");
}

// =============================================================================
// Configuration guard
// =============================================================================

#[test]
fn overlapping_folders_are_rejected_before_any_work() {
    let pair = MirrorPair::new();
    pair.write_source("a.txt", "a");

    let nested = SyncConfig::for_source(pair.source()).with_output(pair.source().join("mirror"));
    let parent = SyncConfig::for_source(pair.source()).with_output(pair.tree.root());
    let same = SyncConfig::for_source(pair.source()).with_output(pair.source());

    for config in [nested, parent, same] {
        assert!(matches!(config.validate(), Err(Error::Overlap { .. })));
    }
    assert_eq!(pair.tree.children("source"), vec!["a.txt"]);
}

// =============================================================================
// Loop
// =============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn loop_follows_source_changes() {
    let pair = MirrorPair::new();
    pair.write_source("first.txt", "1");
    let config = SyncConfig::for_source(pair.source()).with_interval(Duration::from_millis(10));
    let sink = Arc::new(RecordingSink::new());
    let scheduler = Scheduler::new(config, sink.clone());

    let source = pair.source();
    let mutate = async move {
        tokio::time::sleep(Duration::from_millis(60)).await;
        fs::remove_file(source.join("first.txt")).unwrap();
        fs::write(source.join("second.txt"), "2").unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;
    };

    let cycles = scheduler.run_until(mutate).await;

    assert!(cycles >= 3, "expected several cycles, got {cycles}");
    assert_eq!(pair.tree.children("source_copy"), vec!["second.txt"]);
    assert!(sink.messages_at(Level::Error).is_empty());
}
