//! Path derivation and comparison helpers

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use crate::Result;

/// Append `suffix` to the last component of `path`.
///
/// Trailing separators are dropped first, so `data/` and `data` both give
/// `data_copy` for the suffix `_copy`.
pub fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let trimmed: PathBuf = path.components().collect();
    let mut raw: OsString = trimmed.into_os_string();
    raw.push(suffix);
    PathBuf::from(raw)
}

/// Turn `path` into an absolute path suitable for containment checks.
///
/// The longest existing prefix is canonicalized (resolving symbolic links);
/// components that do not exist yet are appended unchanged. `.` and `..` are
/// resolved lexically beforehand.
pub fn resolve_path(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    let absolute = normalize_lexically(&absolute);

    let mut existing = absolute.as_path();
    let mut missing = Vec::new();
    loop {
        if let Ok(canonical) = dunce::canonicalize(existing) {
            let mut resolved = canonical;
            for name in missing.iter().rev() {
                resolved.push(name);
            }
            return Ok(resolved);
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => return Ok(absolute),
        }
    }
}

fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_is_appended_to_last_component() {
        assert_eq!(
            sibling_with_suffix(Path::new("data/photos"), "_copy"),
            PathBuf::from("data/photos_copy")
        );
    }

    #[test]
    fn trailing_separator_is_ignored() {
        assert_eq!(
            sibling_with_suffix(Path::new("data/photos/"), ".log"),
            PathBuf::from("data/photos.log")
        );
    }

    #[test]
    fn lexical_normalization_resolves_dots() {
        assert_eq!(
            normalize_lexically(Path::new("/a/./b/../c")),
            PathBuf::from("/a/c")
        );
    }

    #[test]
    fn resolve_keeps_missing_tail() {
        let dir = tempfile::tempdir().unwrap();
        let canonical = dunce::canonicalize(dir.path()).unwrap();

        let resolved = resolve_path(&dir.path().join("not/yet/there")).unwrap();

        assert_eq!(resolved, canonical.join("not/yet/there"));
    }

    #[cfg(unix)]
    #[test]
    fn resolve_follows_symlinked_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("real");
        std::fs::create_dir(&real).unwrap();
        std::os::unix::fs::symlink(&real, dir.path().join("alias")).unwrap();

        let resolved = resolve_path(&dir.path().join("alias/child")).unwrap();

        assert_eq!(resolved, dunce::canonicalize(&real).unwrap().join("child"));
    }
}
