//! [`TestTree`] and [`MirrorPair`] fixtures.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory with helpers for building and inspecting file trees.
///
/// # Example
///
/// ```rust,no_run
/// use mirror_test_utils::TestTree;
///
/// let tree = TestTree::new();
/// tree.write("docs/readme.md", "hello");
/// tree.assert_file_contains("docs/readme.md", "hello");
/// ```
pub struct TestTree {
    temp_dir: TempDir,
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTree {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Resolve `rel` against the root.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    /// Write `content` to `rel`, creating parent directories as needed.
    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Create the directory `rel` and its parents.
    pub fn mkdir(&self, rel: &str) -> PathBuf {
        let path = self.path(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Sorted names of the immediate children of `rel`.
    pub fn children(&self, rel: &str) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.path(rel))
            .unwrap_or_else(|e| panic!("Could not list {}: {}", rel, e))
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Assert that `rel` exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, rel: &str) {
        let full_path = self.path(rel);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `rel` does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_file_not_exists(&self, rel: &str) {
        let full_path = self.path(rel);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `rel` contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, rel: &str, content: &str) {
        let full_path = self.path(rel);
        let file_content = fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()));
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            full_path.display(),
            content,
            file_content
        );
    }
}

/// The usual mirroring layout: `<tmp>/source` (created) and
/// `<tmp>/source_copy` (not created).
pub struct MirrorPair {
    pub tree: TestTree,
}

impl Default for MirrorPair {
    fn default() -> Self {
        Self::new()
    }
}

impl MirrorPair {
    pub fn new() -> Self {
        let tree = TestTree::new();
        tree.mkdir("source");
        Self { tree }
    }

    pub fn source(&self) -> PathBuf {
        self.tree.path("source")
    }

    pub fn output(&self) -> PathBuf {
        self.tree.path("source_copy")
    }

    /// Write a file below the source root.
    pub fn write_source(&self, rel: &str, content: &str) -> PathBuf {
        self.tree.write(&format!("source/{rel}"), content)
    }

    /// Write a file below the output root, e.g. to plant stale content.
    pub fn write_output(&self, rel: &str, content: &str) -> PathBuf {
        self.tree.write(&format!("source_copy/{rel}"), content)
    }

    /// Populate the source with a mixed tree four levels deep:
    ///
    /// ```text
    /// top.txt
    /// docs/guide.md
    /// docs/api/index.html
    /// docs/api/v1/endpoints.json
    /// docs/api/v1/empty/
    /// media/logo.svg
    /// ```
    pub fn populate_nested(&self) {
        self.write_source("top.txt", "top level file");
        self.write_source("docs/guide.md", "# Guide");
        self.write_source("docs/api/index.html", "<html></html>");
        self.write_source("docs/api/v1/endpoints.json", r#"{"get": "/items"}"#);
        self.tree.mkdir("source/docs/api/v1/empty");
        self.write_source("media/logo.svg", "<svg/>");
    }
}
