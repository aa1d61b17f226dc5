//! Structural snapshots of directory trees
//!
//! A [`TreeSnapshot`] records every path below a root together with its
//! contents checksum. Two trees are structurally identical exactly when their
//! snapshots compare equal.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use walkdir::WalkDir;

use crate::checksum::compute_file_checksum;
use crate::{Error, Result};

/// A single node in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotNode {
    Dir,
    File { len: u64, checksum: String },
}

/// Sorted map from root-relative path (forward slashes) to node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeSnapshot {
    nodes: BTreeMap<String, SnapshotNode>,
}

impl TreeSnapshot {
    /// Walk `root` recursively, following symbolic links, and record every
    /// file and directory below it. The root itself is not recorded.
    ///
    /// # Errors
    ///
    /// Returns an error if any directory cannot be listed or any file cannot
    /// be read.
    pub fn capture(root: &Path) -> Result<Self> {
        let mut snapshot = Self::default();

        for item in WalkDir::new(root).follow_links(true).min_depth(1) {
            let entry = item.map_err(|e| Error::walk(root, e))?;
            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };
            let key = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            let node = if entry.file_type().is_dir() {
                SnapshotNode::Dir
            } else {
                let path = entry.path();
                let len = entry
                    .metadata()
                    .map_err(|e| Error::walk(root, e))?
                    .len();
                let checksum = compute_file_checksum(path).map_err(|e| Error::io(path, e))?;
                SnapshotNode::File { len, checksum }
            };
            snapshot.nodes.insert(key, node);
        }

        Ok(snapshot)
    }

    /// Number of recorded paths.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node by its root-relative path.
    pub fn get(&self, relative: &str) -> Option<&SnapshotNode> {
        self.nodes.get(relative)
    }

    /// Relative paths in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Names of the top-level entries only.
    pub fn top_level(&self) -> Vec<&str> {
        self.paths().filter(|p| !p.contains('/')).collect()
    }
}

impl fmt::Display for TreeSnapshot {
    /// One line per path: `d name/` for directories, `f name (len)` for files.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (path, node) in &self.nodes {
            match node {
                SnapshotNode::Dir => writeln!(f, "d {path}/")?,
                SnapshotNode::File { len, .. } => writeln!(f, "f {path} ({len})")?,
            }
        }
        Ok(())
    }
}
