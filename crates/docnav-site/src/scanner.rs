//! Document discovery by walking a [`Storage`] tree.
//!
//! The walk itself only lists directories; markdown files are read afterwards
//! (in parallel) to classify their titles. Any listing or read failure aborts
//! the scan, so callers never see a partial tree.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use docnav_storage::{Storage, StorageError};
use rayon::prelude::*;

use crate::entry::{DocEntry, DocSet};
use crate::text::identifier;

/// Markdown file extension.
const MARKDOWN_EXTENSION: &str = ".md";

/// Default name of per-directory title override files.
pub const DEFAULT_TITLE_FILE: &str = "TITLE";

/// A markdown file found during the walk, not yet read.
struct PendingDoc {
    path: PathBuf,
    segments: Vec<String>,
    file_name: String,
}

/// Walks a documentation directory and produces a [`DocSet`].
pub struct DocScanner<'a> {
    storage: &'a dyn Storage,
    root: PathBuf,
    title_file: String,
}

impl<'a> DocScanner<'a> {
    /// Create a scanner for `root` (relative to the storage root).
    pub fn new(storage: &'a dyn Storage, root: impl Into<PathBuf>) -> Self {
        Self {
            storage,
            root: root.into(),
            title_file: DEFAULT_TITLE_FILE.to_owned(),
        }
    }

    /// Use a different file name for directory title overrides.
    #[must_use]
    pub fn with_title_file(mut self, title_file: impl Into<String>) -> Self {
        self.title_file = title_file.into();
        self
    }

    /// Scan the tree.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if any directory can't be listed or any
    /// markdown or title file can't be read.
    pub fn scan(&self) -> Result<DocSet, StorageError> {
        let mut queue: Vec<(PathBuf, Vec<String>)> = vec![(self.root.clone(), Vec::new())];
        let mut pending = Vec::new();
        let mut dir_titles = BTreeMap::new();

        while let Some((dir, segments)) = queue.pop() {
            for entry in self.storage.list(&dir)? {
                let path = dir.join(&entry.name);
                if entry.is_dir() {
                    let mut child_segments = segments.clone();
                    child_segments.push(entry.name);
                    queue.push((path, child_segments));
                } else if entry.name.ends_with(MARKDOWN_EXTENSION) {
                    pending.push(PendingDoc {
                        path,
                        segments: segments.clone(),
                        file_name: entry.name,
                    });
                } else if entry.name == self.title_file {
                    let content = self.storage.read(&path)?;
                    if let Some(title) = first_line(&content)
                        .map(str::trim)
                        .filter(|t| !t.is_empty())
                    {
                        dir_titles.insert(segments.clone(), title.to_owned());
                    }
                }
            }
        }

        let entries = pending
            .into_par_iter()
            .map(|doc| self.read_entry(doc))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            root = %self.root.display(),
            document_count = entries.len(),
            title_overrides = dir_titles.len(),
            "Documentation scan completed"
        );

        Ok(DocSet::new(entries, dir_titles))
    }

    /// Read a markdown file and build its entry.
    fn read_entry(&self, doc: PendingDoc) -> Result<DocEntry, StorageError> {
        let content = self.storage.read(&doc.path)?;
        let base_name = doc
            .file_name
            .strip_suffix(MARKDOWN_EXTENSION)
            .unwrap_or(&doc.file_name)
            .to_owned();
        let title = first_line(&content)
            .and_then(heading_text)
            .map_or_else(|| base_name.clone(), ToOwned::to_owned);

        let root_parts = path_parts(&self.root);
        let tail = doc
            .segments
            .iter()
            .cloned()
            .chain(std::iter::once(doc.file_name.clone()));
        let source_path = root_parts.iter().cloned().chain(tail.clone()).collect::<Vec<_>>();
        let module_path = root_parts
            .last()
            .cloned()
            .into_iter()
            .chain(tail)
            .collect::<Vec<_>>();

        Ok(DocEntry {
            identifier: identifier(&doc.segments, &title),
            absolute_file_path: self.storage.resolve(&doc.path),
            source_path: source_path.join("/"),
            module_path: module_path.join("/"),
            file_name: doc.file_name,
            relative_path: doc.segments,
            base_name,
            title,
        })
    }
}

/// First line of `content`, without trailing whitespace.
fn first_line(content: &str) -> Option<&str> {
    content.lines().next().map(str::trim_end)
}

/// Heading text of a markdown heading line.
///
/// The line must start with one or more `#` followed by whitespace. Returns
/// `None` for non-heading lines and for headings with no text.
fn heading_text(line: &str) -> Option<&str> {
    let rest = line.trim_start_matches('#');
    if rest.len() == line.len() || !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(rest.trim()).filter(|t| !t.is_empty())
}

/// Split a relative path into `/`-joinable string parts.
fn path_parts(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|c| match c {
            std::path::Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}
