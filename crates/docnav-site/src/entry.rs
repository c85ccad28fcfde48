//! Scanned documentation entries.

use std::collections::BTreeMap;
use std::path::PathBuf;

/// A markdown document discovered by [`DocScanner`](crate::DocScanner).
///
/// Immutable once created. Paths use `/` separators regardless of platform so
/// that generated artifacts are identical everywhere.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocEntry {
    /// Leaf file name including extension (e.g., "intro.md").
    pub file_name: String,
    /// Directory segments from the scan root to the file's parent.
    pub relative_path: Vec<String>,
    /// File name without extension (e.g., "intro").
    pub base_name: String,
    /// Heading text of the first line, or `base_name`.
    pub title: String,
    /// Code-safe name unique within one scan.
    pub identifier: String,
    /// Resolvable location of the source file.
    pub absolute_file_path: PathBuf,
    /// Path relative to the storage root (e.g., "src/docs/guides/intro.md").
    pub source_path: String,
    /// Import specifier relative to the parent of the scan root
    /// (e.g., "docs/guides/intro.md").
    pub module_path: String,
}

/// Result of a documentation scan.
///
/// Holds the entries sorted by `source_path` and the directory title
/// overrides found while walking the same tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocSet {
    entries: Vec<DocEntry>,
    dir_titles: BTreeMap<Vec<String>, String>,
}

impl DocSet {
    /// Create a document set, sorting entries by source path.
    #[must_use]
    pub fn new(mut entries: Vec<DocEntry>, dir_titles: BTreeMap<Vec<String>, String>) -> Self {
        entries.sort_by(|a, b| a.source_path.cmp(&b.source_path));
        Self {
            entries,
            dir_titles,
        }
    }

    /// Entries sorted by source path.
    #[must_use]
    pub fn entries(&self) -> &[DocEntry] {
        &self.entries
    }

    /// Title override for the directory at `segments`, if one exists.
    #[must_use]
    pub fn dir_title(&self, segments: &[String]) -> Option<&str> {
        self.dir_titles.get(segments).map(String::as_str)
    }

    /// Number of documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no documents were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn test_entry(segments: &[&str], file_name: &str, title: &str) -> DocEntry {
    let relative_path: Vec<String> = segments.iter().map(|s| (*s).to_owned()).collect();
    let base_name = file_name.trim_end_matches(".md").to_owned();
    let mut parts = vec!["docs".to_owned()];
    parts.extend(relative_path.iter().cloned());
    parts.push(file_name.to_owned());
    let module_path = parts.join("/");
    DocEntry {
        file_name: file_name.to_owned(),
        identifier: crate::identifier(&relative_path, title),
        relative_path,
        base_name,
        title: title.to_owned(),
        absolute_file_path: PathBuf::from("/project/src").join(&module_path),
        source_path: format!("src/{module_path}"),
        module_path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_set_sorts_by_source_path() {
        let docs = DocSet::new(
            vec![
                test_entry(&["b"], "x.md", "X"),
                test_entry(&[], "z.md", "Z"),
                test_entry(&["a"], "y.md", "Y"),
            ],
            BTreeMap::new(),
        );

        let paths: Vec<_> = docs.entries().iter().map(|e| e.source_path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["src/docs/a/y.md", "src/docs/b/x.md", "src/docs/z.md"]
        );
    }

    #[test]
    fn test_dir_title_lookup() {
        let mut titles = BTreeMap::new();
        titles.insert(vec!["guides".to_owned()], "User Guides".to_owned());
        let docs = DocSet::new(Vec::new(), titles);

        assert_eq!(docs.dir_title(&["guides".to_owned()]), Some("User Guides"));
        assert_eq!(docs.dir_title(&["other".to_owned()]), None);
        assert!(docs.is_empty());
    }
}
