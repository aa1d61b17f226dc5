//! Synchronization engine for dirmirror
//!
//! Mirrors the immediate entries of a source folder into an output folder,
//! replacing the output's contents entirely on every cycle.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use mirror_core::{Scheduler, SyncConfig, TracingSink};
//!
//! let config = SyncConfig::for_source("photos");
//! config.validate()?;
//! let scheduler = Scheduler::new(config, Arc::new(TracingSink));
//! scheduler.run_forever().await;
//! ```

pub mod config;
pub mod error;
pub mod sink;
pub mod sync;

pub use config::{ConfigLayer, SyncConfig};
pub use error::{Error, Result};
pub use sink::{Level, LogSink, RecordingSink, TracingSink};
pub use sync::{CycleReport, EntryOutcome, EntryStatus, RemovalFailure, Scheduler, Synchronizer};
