//! The mirroring command: one cycle or the endless loop

use std::future::Future;
use std::sync::Arc;

use colored::Colorize;
use mirror_core::{CycleReport, LogSink, Scheduler, SyncConfig, TracingSink};
use tokio::sync::oneshot;

use crate::error::Result;

/// Run a single cycle. Prints the report as JSON or as a short summary.
pub async fn run_once(config: SyncConfig, json: bool) -> Result<()> {
    let scheduler = Scheduler::new(config, sink());
    let report = scheduler.run_once().await?;

    if json {
        println!("{}", report.to_json()?);
    } else {
        print_summary(&report);
    }
    Ok(())
}

/// Run the sync loop until Ctrl-C or SIGTERM, finishing the current cycle first.
pub async fn run_loop(config: SyncConfig) -> Result<()> {
    tracing::info!(
        source = %config.source.display(),
        output = %config.output.display(),
        interval_secs = config.interval.as_secs(),
        "Starting dirmirror"
    );

    let scheduler = Scheduler::new(config, sink());
    let cycles = scheduler.run_until(shutdown_signal()).await;

    tracing::info!(cycles, "dirmirror stopped");
    Ok(())
}

fn sink() -> Arc<dyn LogSink> {
    Arc::new(TracingSink)
}

fn print_summary(report: &CycleReport) {
    if report.is_clean() {
        println!("{} {}", "OK".green().bold(), report);
    } else {
        println!("{} {}", "WARN".yellow().bold(), report);
        for failure in &report.removal_failures {
            println!(
                "   {} {}: {}",
                "-".red(),
                failure.path.display(),
                failure.error
            );
        }
        for entry in report.failures() {
            if let mirror_core::EntryStatus::Failed { error } = &entry.status {
                println!("   {} {}: {}", "-".red(), entry.path.display(), error);
            }
        }
    }
}

/// Resolves once a stop signal arrives.
///
/// The listener task is spawned immediately so signals that arrive during
/// the first cycle are not lost.
fn shutdown_signal() -> impl Future<Output = ()> {
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        wait_for_signal().await;
        tracing::info!("Stop signal received, finishing current cycle");
        let _ = tx.send(());
    });
    async move {
        let _ = rx.await;
    }
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut terminate) => {
            tokio::select! {
                result = tokio::signal::ctrl_c() => {
                    if let Err(e) = result {
                        tracing::warn!(error = %e, "Ctrl-C handler failed");
                        terminate.recv().await;
                    }
                }
                _ = terminate.recv() => {}
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "SIGTERM handler unavailable");
            ctrl_c_or_never().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    ctrl_c_or_never().await;
}

async fn ctrl_c_or_never() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Ctrl-C handler unavailable, running until killed");
        std::future::pending::<()>().await;
    }
}
