//! Filesystem storage backend.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::storage::{DirEntry, EntryKind, Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem storage rooted at a project directory.
///
/// Every path handed to the [`Storage`] methods is joined onto `root`.
/// Paths that try to escape the root (`..`, absolute paths) are rejected.
#[derive(Debug, Clone)]
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    /// Create a storage rooted at `root`.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Root directory of this storage.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validate that a relative path stays below the root.
    fn validate_path(path: &Path) -> Result<(), StorageError> {
        let escapes = path
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(path)
                .with_backend(BACKEND));
        }
        Ok(())
    }

    fn io_error(err: std::io::Error, path: &Path) -> StorageError {
        StorageError::io(err, Some(path.to_path_buf())).with_backend(BACKEND)
    }
}

impl Storage for FsStorage {
    fn list(&self, dir: &Path) -> Result<Vec<DirEntry>, StorageError> {
        Self::validate_path(dir)?;
        let full = self.root.join(dir);

        let mut entries = Vec::new();
        for entry in fs::read_dir(&full).map_err(|e| Self::io_error(e, &full))? {
            let entry = entry.map_err(|e| Self::io_error(e, &full))?;
            // Follows symlinks, so a linked directory is listed like a real one.
            let is_dir = fs::metadata(entry.path())
                .map_err(|e| Self::io_error(e, &entry.path()))?
                .is_dir();
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                kind: if is_dir {
                    EntryKind::Directory
                } else {
                    EntryKind::File
                },
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        tracing::trace!(dir = %full.display(), count = entries.len(), "Listed directory");
        Ok(entries)
    }

    fn read(&self, path: &Path) -> Result<String, StorageError> {
        Self::validate_path(path)?;
        let full = self.root.join(path);
        fs::read_to_string(&full).map_err(|e| Self::io_error(e, &full))
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        let joined = self.root.join(path);
        joined.canonicalize().unwrap_or(joined)
    }
}
