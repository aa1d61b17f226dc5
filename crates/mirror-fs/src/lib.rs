//! Filesystem layer for dirmirror
//!
//! Provides one-level directory listing, entry removal, recursive tree copy,
//! tree snapshots and configuration file loading.

pub mod checksum;
pub mod config;
pub mod error;
pub mod io;
pub mod lister;
pub mod snapshot;

pub use config::{ConfigFormat, ConfigStore};
pub use error::{Error, Result, TreeCopyFailure};
pub use io::{CopyStats, copy_entry, copy_file, copy_tree, ensure_dir, remove_entry};
pub use lister::{EntryKind, SourceEntry, list_entries};
pub use snapshot::{SnapshotNode, TreeSnapshot};
