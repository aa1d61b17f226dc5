//! Synchronization engine
//!
//! This module provides:
//! - **synchronizer**: one clear-then-copy cycle with concurrent, isolated copies
//! - **scheduler**: the loop that runs cycles separated by the sync interval
//! - **report**: per-cycle outcome reporting

mod report;
mod scheduler;
mod synchronizer;

pub use report::{CycleReport, EntryOutcome, EntryStatus, RemovalFailure};
pub use scheduler::Scheduler;
pub use synchronizer::Synchronizer;
