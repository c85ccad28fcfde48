//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::storage::{DirEntry, Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Mock storage for testing.
///
/// Stores files in memory. Directories are implied by file paths. Use the
/// builder methods to configure the mock with test data.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use docnav_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_file("src/docs/guides/intro.md", "# Getting Started\n");
///
/// let entries = storage.list(Path::new("src/docs")).unwrap();
/// let content = storage.read(Path::new("src/docs/guides/intro.md")).unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    files: RwLock<BTreeMap<PathBuf, String>>,
    unreadable: RwLock<BTreeSet<PathBuf>>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with content.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files
            .write()
            .unwrap()
            .insert(path.into(), content.into());
        self
    }

    /// Add a file that exists in listings but fails on read.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_unreadable(self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.files
            .write()
            .unwrap()
            .insert(path.clone(), String::new());
        self.unreadable.write().unwrap().insert(path);
        self
    }
}

impl Storage for MockStorage {
    fn list(&self, dir: &Path) -> Result<Vec<DirEntry>, StorageError> {
        let files = self.files.read().unwrap();
        let mut entries: BTreeMap<String, DirEntry> = BTreeMap::new();

        for file in files.keys() {
            let Ok(rest) = file.strip_prefix(dir) else {
                continue;
            };
            let mut components = rest.components();
            let Some(first) = components.next() else {
                continue;
            };
            let name = first.as_os_str().to_string_lossy().into_owned();
            let entry = if components.next().is_some() {
                DirEntry::dir(name.clone())
            } else {
                DirEntry::file(name.clone())
            };
            entries.entry(name).or_insert(entry);
        }

        if entries.is_empty() && !dir.as_os_str().is_empty() {
            return Err(StorageError::not_found(dir).with_backend(BACKEND));
        }
        Ok(entries.into_values().collect())
    }

    fn read(&self, path: &Path) -> Result<String, StorageError> {
        if self.unreadable.read().unwrap().contains(path) {
            return Err(StorageError::new(StorageErrorKind::PermissionDenied)
                .with_path(path)
                .with_backend(BACKEND));
        }
        self.files
            .read()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        Path::new("/mock").join(path)
    }
}
