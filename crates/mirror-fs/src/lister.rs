//! One-level directory listing
//!
//! The Lister only looks at the immediate children of a directory. Recursion
//! happens later, when a directory entry is copied as a whole.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::{Error, Result};

/// What a listed entry resolves to once symbolic links are followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    File,
    Directory,
    /// Dangling link, socket, FIFO or device. Never copied.
    Other,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::File => "file",
            Self::Directory => "directory",
            Self::Other => "other",
        };
        write!(f, "{name}")
    }
}

/// An immediate child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    /// Full path of the entry (listed directory joined with the entry name)
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl SourceEntry {
    /// The entry's name inside its parent directory.
    pub fn name(&self) -> &std::ffi::OsStr {
        // Paths produced by `list_entries` always end in a file name
        self.path.file_name().unwrap_or(self.path.as_os_str())
    }

    /// Where this entry lands when copied into `dest_root`.
    pub fn target_in(&self, dest_root: &Path) -> PathBuf {
        dest_root.join(self.name())
    }
}

/// List the immediate children of `dir`, sorted by name.
///
/// An empty directory yields an empty list.
///
/// # Errors
///
/// Returns [`Error::Io`] if `dir` does not exist, is not a readable directory,
/// or if any entry cannot be read while iterating.
pub fn list_entries(dir: &Path) -> Result<Vec<SourceEntry>> {
    let read_dir = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;

    let mut entries = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let path = entry.path();
        let kind = classify(&path);
        entries.push(SourceEntry { path, kind });
    }

    entries.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    tracing::debug!(dir = %dir.display(), count = entries.len(), "Listed entries");
    Ok(entries)
}

/// Classify a path, following symbolic links the way the copy primitives do.
fn classify(path: &Path) -> EntryKind {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => EntryKind::Directory,
        Ok(meta) if meta.is_file() => EntryKind::File,
        _ => EntryKind::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_kind_display() {
        assert_eq!(EntryKind::File.to_string(), "file");
        assert_eq!(EntryKind::Directory.to_string(), "directory");
        assert_eq!(EntryKind::Other.to_string(), "other");
    }

    #[test]
    fn target_in_keeps_entry_name() {
        let entry = SourceEntry {
            path: PathBuf::from("/data/src/report.txt"),
            kind: EntryKind::File,
        };
        assert_eq!(
            entry.target_in(Path::new("/data/out")),
            PathBuf::from("/data/out/report.txt")
        );
    }
}
