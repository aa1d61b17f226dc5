//! Content digests for tree snapshots
//!
//! Every digest is rendered as `sha256:<hex>`.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const PREFIX: &str = "sha256:";

fn render(hasher: Sha256) -> String {
    format!("{PREFIX}{:x}", hasher.finalize())
}

/// Digest of an in-memory buffer.
pub fn compute_bytes_checksum(content: &[u8]) -> String {
    render(Sha256::new_with_prefix(content))
}

/// Digest of a file, read in chunks so large files are never loaded whole.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn compute_file_checksum(path: &Path) -> std::io::Result<String> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut hasher = Sha256::new();
    std::io::copy(&mut reader, &mut hasher)?;
    Ok(render(hasher))
}
