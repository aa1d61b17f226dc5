//! Copy and removal primitives
//!
//! All functions here are blocking. Callers running on an async runtime are
//! expected to move them onto a blocking thread.

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::TreeCopyFailure;
use crate::lister::{EntryKind, SourceEntry};
use crate::{Error, Result};

/// Counters for a finished copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    /// Regular files written
    pub files: u64,
    /// Directories created, including the copied root itself
    pub dirs: u64,
    /// Bytes written across all files
    pub bytes: u64,
}

/// Create `dir` and any missing parents. A directory that already exists is
/// left untouched.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))
}

/// Remove a single entry.
///
/// Real directories are removed recursively. Files and symbolic links are
/// unlinked; a link to a directory is never followed.
pub fn remove_entry(path: &Path) -> Result<()> {
    let meta = fs::symlink_metadata(path).map_err(|e| Error::io(path, e))?;

    if meta.is_dir() {
        fs::remove_dir_all(path).map_err(|e| Error::io(path, e))
    } else {
        fs::remove_file(path).map_err(|e| Error::io(path, e))
    }
}

/// Copy the contents of the file at `src` to `dst`, byte for byte.
pub fn copy_file(src: &Path, dst: &Path) -> Result<CopyStats> {
    let bytes = fs::copy(src, dst).map_err(|e| Error::io(src, e))?;
    Ok(CopyStats {
        files: 1,
        dirs: 0,
        bytes,
    })
}

/// Recursively copy the directory `src` to `dst`.
///
/// `dst` must not exist yet. It is created only after `src` has been opened,
/// so an unreadable source leaves nothing behind. Symbolic links inside the
/// tree are followed; a link back to one of its own ancestors is reported as
/// a failure instead of being descended into. A nested item that fails does
/// not stop its siblings from being copied; every failure is collected and
/// reported together in [`Error::TreeCopy`]. Whatever was copied before the
/// error stays in place.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<CopyStats> {
    fs::read_dir(src).map_err(|e| Error::io(src, e))?;
    fs::create_dir(dst).map_err(|e| Error::io(dst, e))?;

    let mut stats = CopyStats {
        dirs: 1,
        ..CopyStats::default()
    };
    let mut failures = Vec::new();

    let mut walker = WalkDir::new(src)
        .follow_links(true)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter();

    while let Some(item) = walker.next() {
        let entry = match item {
            Ok(entry) => entry,
            Err(err) => {
                failures.push(TreeCopyFailure::from_walk(src, err));
                continue;
            }
        };
        let from = entry.path();
        let Ok(relative) = from.strip_prefix(src) else {
            continue;
        };
        let to = dst.join(relative);

        let result = if entry.file_type().is_dir() {
            // Opened first so an unreadable directory is not mirrored as empty
            match fs::read_dir(from).and_then(|_| fs::create_dir(&to)) {
                Ok(()) => {
                    stats.dirs += 1;
                    Ok(())
                }
                Err(source) => {
                    walker.skip_current_dir();
                    Err(source)
                }
            }
        } else if entry.file_type().is_file() {
            fs::copy(from, &to).map(|bytes| {
                stats.files += 1;
                stats.bytes += bytes;
            })
        } else {
            Err(not_copyable())
        };

        if let Err(source) = result {
            failures.push(TreeCopyFailure {
                path: from.to_path_buf(),
                source,
            });
        }
    }

    if failures.is_empty() {
        Ok(stats)
    } else {
        Err(Error::TreeCopy {
            path: src.to_path_buf(),
            failures,
        })
    }
}

/// Copy a listed entry into `dest_root`, keeping its name.
///
/// Entries of kind [`EntryKind::Other`] are not copyable and produce an
/// `InvalidInput` I/O error.
pub fn copy_entry(entry: &SourceEntry, dest_root: &Path) -> Result<CopyStats> {
    let target = entry.target_in(dest_root);
    match entry.kind {
        EntryKind::File => copy_file(&entry.path, &target),
        EntryKind::Directory => copy_tree(&entry.path, &target),
        EntryKind::Other => Err(Error::io(&entry.path, not_copyable())),
    }
}

fn not_copyable() -> std::io::Error {
    std::io::Error::new(
        std::io::ErrorKind::InvalidInput,
        "not a regular file or directory",
    )
}
