//! The sync loop
//!
//! Cycles never overlap: each one is awaited to completion before the
//! interval sleep starts. A stop request is only observed while sleeping, so
//! it takes effect at the next cycle boundary.

use std::future::Future;
use std::sync::Arc;

use super::report::CycleReport;
use super::synchronizer::Synchronizer;
use crate::Result;
use crate::config::SyncConfig;
use crate::sink::{Level, LogSink};

/// Drives a [`Synchronizer`] with a fixed configuration.
pub struct Scheduler {
    config: SyncConfig,
    synchronizer: Synchronizer,
    sink: Arc<dyn LogSink>,
}

impl Scheduler {
    pub fn new(config: SyncConfig, sink: Arc<dyn LogSink>) -> Self {
        let synchronizer =
            Synchronizer::new(Arc::clone(&sink)).with_max_parallel(config.max_parallel);
        Self {
            config,
            synchronizer,
            sink,
        }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Run a single cycle with the configured paths.
    pub async fn run_once(&self) -> Result<CycleReport> {
        self.synchronizer
            .run_cycle(&self.config.source, &self.config.output)
            .await
    }

    /// Loop until `shutdown` resolves, returning the number of cycles run.
    ///
    /// A cycle that cannot start is reported through the sink and retried
    /// after the next interval.
    pub async fn run_until<F>(&self, shutdown: F) -> u64
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut cycles = 0u64;

        loop {
            match self.run_once().await {
                Ok(report) => {
                    tracing::debug!(cycle = cycles + 1, clean = report.is_clean(), "Cycle done");
                }
                Err(e) => {
                    self.sink
                        .accept(Level::Error, &format!("Cycle aborted: {e}"));
                }
            }
            cycles += 1;

            tokio::select! {
                biased;
                () = &mut shutdown => {
                    tracing::info!(cycles, "Stop requested, leaving sync loop");
                    return cycles;
                }
                () = tokio::time::sleep(self.config.interval) => {}
            }
        }
    }

    /// Loop with no stop condition.
    pub async fn run_forever(&self) {
        self.run_until(std::future::pending::<()>()).await;
    }
}
