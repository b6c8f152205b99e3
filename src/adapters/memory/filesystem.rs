//! In-memory filesystem adapter.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::ports::filesystem::FileSystem;

/// Filesystem backed by a shared map of path to contents.
///
/// Clones share the same underlying map, so a test can hand one clone to a
/// `ServiceContext` and inspect written files through another.
#[derive(Clone, Default)]
pub struct MemoryFileSystem {
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
}

impl MemoryFileSystem {
    /// Creates an empty filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file and returns `self` for chaining.
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>, contents: &str) -> Self {
        self.insert(path, contents);
        self
    }

    /// Adds or replaces a file.
    pub fn insert(&self, path: impl Into<PathBuf>, contents: &str) {
        let mut files = self.files.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        files.insert(path.into(), contents.to_string());
    }

    /// Returns the contents of a file, if present.
    #[must_use]
    pub fn get(&self, path: &Path) -> Option<String> {
        let files = self.files.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        files.get(path).cloned()
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        self.get(path).ok_or_else(|| format!("File not found: {}", path.display()).into())
    }

    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.insert(path, contents);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_contents() {
        let fs = MemoryFileSystem::new();
        let other = fs.clone();

        fs.write(Path::new("/out.js"), "bundle").unwrap();

        assert_eq!(other.get(Path::new("/out.js")).as_deref(), Some("bundle"));
    }

    #[test]
    fn missing_file_reports_path() {
        let fs = MemoryFileSystem::new();
        let err = fs.read_to_string(Path::new("/app/view/Main.js")).unwrap_err();
        assert!(err.to_string().contains("/app/view/Main.js"));
    }
}
