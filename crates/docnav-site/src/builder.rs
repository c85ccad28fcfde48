//! End-to-end build of the documentation artifacts.
//!
//! [`SiteBuilder`] scans a source directory through a [`Storage`] backend and
//! produces every artifact in memory. Nothing touches the output directory
//! until [`BuildOutput::write_to`] is called, so a failed build leaves the
//! previous artifacts in place.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use docnav_storage::Storage;

use crate::entry::DocSet;
use crate::error::BuildError;
use crate::registry::RouteRegistry;
use crate::route_tree::{RouteTree, RouteTreeBuilder};
use crate::scanner::{DEFAULT_TITLE_FILE, DocScanner};
use crate::sitemap::SitemapGenerator;

/// File name of the generated routes module.
pub const ROUTES_MODULE_FILE: &str = "routes.js";

/// File name of the generated route manifest.
pub const MANIFEST_FILE: &str = "routes.json";

/// File name of the generated sitemap.
pub const SITEMAP_FILE: &str = "sitemap.xml";

/// Options for [`SiteBuilder`].
#[derive(Clone, Debug)]
pub struct BuildOptions {
    /// Documentation root, relative to the storage root.
    pub source_dir: PathBuf,
    /// Per-directory title override file name.
    pub title_file: String,
    /// Public base URL. The sitemap is only generated when set.
    pub base_url: Option<String>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("src/docs"),
            title_file: DEFAULT_TITLE_FILE.to_owned(),
            base_url: None,
        }
    }
}

/// Artifacts produced by a successful build.
#[derive(Debug)]
pub struct BuildOutput {
    /// Scanned documents.
    pub docs: DocSet,
    /// Route tree.
    pub tree: RouteTree,
    /// Generated routes module source.
    pub routes_module: String,
    /// Route manifest JSON.
    pub manifest: String,
    /// Sitemap XML, when a base URL was configured.
    pub sitemap: Option<String>,
}

impl BuildOutput {
    /// Flat route registry for the built tree.
    #[must_use]
    pub fn registry(&self) -> RouteRegistry {
        RouteRegistry::from_tree(&self.tree)
    }

    /// Write the artifacts into `output_dir`, creating it if needed.
    ///
    /// Returns the paths written, in write order. Without a sitemap, a
    /// sitemap left by an earlier build is removed.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Write`] if the directory or a file can't be
    /// written, or a stale sitemap can't be removed.
    pub fn write_to(&self, output_dir: &Path) -> Result<Vec<PathBuf>, BuildError> {
        fs::create_dir_all(output_dir).map_err(|source| BuildError::Write {
            path: output_dir.to_path_buf(),
            source,
        })?;

        let mut artifacts = vec![
            (ROUTES_MODULE_FILE, self.routes_module.as_str()),
            (MANIFEST_FILE, self.manifest.as_str()),
        ];
        if let Some(sitemap) = &self.sitemap {
            artifacts.push((SITEMAP_FILE, sitemap));
        } else {
            remove_stale(&output_dir.join(SITEMAP_FILE))?;
        }

        let mut written = Vec::with_capacity(artifacts.len());
        for (name, content) in artifacts {
            let path = output_dir.join(name);
            fs::write(&path, content).map_err(|source| BuildError::Write {
                path: path.clone(),
                source,
            })?;
            tracing::debug!(path = %path.display(), bytes = content.len(), "Wrote artifact");
            written.push(path);
        }
        Ok(written)
    }
}

fn remove_stale(path: &Path) -> Result<(), BuildError> {
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "Removed stale artifact");
            Ok(())
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(BuildError::Write {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Builds documentation artifacts from a storage backend.
pub struct SiteBuilder {
    storage: Arc<dyn Storage>,
    options: BuildOptions,
}

impl SiteBuilder {
    /// Create a builder over `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, options: BuildOptions) -> Self {
        Self { storage, options }
    }

    /// Scan the source directory and generate every artifact.
    ///
    /// # Errors
    ///
    /// Returns the first scan, collision or serialization error. All errors
    /// are fatal.
    pub fn build(&self) -> Result<BuildOutput, BuildError> {
        let docs = DocScanner::new(self.storage.as_ref(), &self.options.source_dir)
            .with_title_file(&self.options.title_file)
            .scan()?;
        tracing::info!(
            source_dir = %self.options.source_dir.display(),
            documents = docs.len(),
            "Scanned documentation"
        );

        let tree = RouteTreeBuilder::new().build(&docs)?;
        let routes_module = tree.to_module();
        let manifest = tree.to_manifest()?;
        let sitemap = match &self.options.base_url {
            Some(base_url) => Some(SitemapGenerator::new(base_url.as_str()).render(&docs)?),
            None => None,
        };

        Ok(BuildOutput {
            docs,
            tree,
            routes_module,
            manifest,
            sitemap,
        })
    }
}

#[cfg(test)]
mod tests {
    use docnav_storage::{FsStorage, MockStorage};
    use pretty_assertions::assert_eq;

    use super::*;

    fn mock_storage() -> Arc<dyn Storage> {
        Arc::new(
            MockStorage::new()
                .with_file("src/docs/intro.md", "# Introduction\n")
                .with_file("src/docs/guides/setup.md", "# Setup\n\nSteps.")
                .with_file("src/docs/guides/TITLE", "User Guides\n"),
        )
    }

    #[test]
    fn test_build_without_base_url_skips_sitemap() {
        let output = SiteBuilder::new(mock_storage(), BuildOptions::default())
            .build()
            .unwrap();

        assert_eq!(output.docs.len(), 2);
        assert!(output.sitemap.is_none());
        assert!(output.routes_module.contains("export default ["));
        assert!(output.manifest.contains("\"fileLocation\""));
    }

    #[test]
    fn test_build_with_base_url() {
        let options = BuildOptions {
            base_url: Some("https://docs.example.com".to_owned()),
            ..BuildOptions::default()
        };
        let output = SiteBuilder::new(mock_storage(), options).build().unwrap();

        let sitemap = output.sitemap.unwrap();
        assert!(sitemap.contains("https://docs.example.com/?p=/#/documentation/guides/setup"));
    }

    #[test]
    fn test_registry_reflects_title_override() {
        let output = SiteBuilder::new(mock_storage(), BuildOptions::default())
            .build()
            .unwrap();

        let registry = output.registry();
        assert_eq!(
            registry.get("/documentation/guides").map(|r| r.name.as_str()),
            Some("User Guides")
        );
        assert!(registry.get("/documentation/introduction").is_some());
    }

    #[test]
    fn test_missing_source_dir_is_fatal() {
        let options = BuildOptions {
            source_dir: PathBuf::from("missing"),
            ..BuildOptions::default()
        };
        let result = SiteBuilder::new(mock_storage(), options).build();

        assert!(matches!(result, Err(BuildError::Scan(_))));
    }

    #[test]
    fn test_write_to_creates_artifacts() {
        let project = tempfile::tempdir().unwrap();
        let docs = project.path().join("src/docs");
        fs::create_dir_all(&docs).unwrap();
        fs::write(docs.join("intro.md"), "# Introduction\n").unwrap();

        let options = BuildOptions {
            base_url: Some("https://example.com".to_owned()),
            ..BuildOptions::default()
        };
        let storage: Arc<dyn Storage> = Arc::new(FsStorage::new(project.path().to_path_buf()));
        let output = SiteBuilder::new(storage, options).build().unwrap();

        let out_dir = project.path().join("out/nested");
        let written = output.write_to(&out_dir).unwrap();

        assert_eq!(
            written,
            vec![
                out_dir.join(ROUTES_MODULE_FILE),
                out_dir.join(MANIFEST_FILE),
                out_dir.join(SITEMAP_FILE),
            ]
        );
        let module = fs::read_to_string(out_dir.join(ROUTES_MODULE_FILE)).unwrap();
        assert_eq!(module, output.routes_module);
        let manifest = fs::read_to_string(out_dir.join(MANIFEST_FILE)).unwrap();
        assert_eq!(RouteTree::from_manifest(&manifest).unwrap(), output.tree);
    }

    #[test]
    fn test_write_to_removes_stale_sitemap() {
        let out_dir = tempfile::tempdir().unwrap();
        let with_sitemap = BuildOptions {
            base_url: Some("https://example.com".to_owned()),
            ..BuildOptions::default()
        };
        SiteBuilder::new(mock_storage(), with_sitemap)
            .build()
            .unwrap()
            .write_to(out_dir.path())
            .unwrap();
        assert!(out_dir.path().join(SITEMAP_FILE).is_file());

        let written = SiteBuilder::new(mock_storage(), BuildOptions::default())
            .build()
            .unwrap()
            .write_to(out_dir.path())
            .unwrap();

        assert_eq!(written.len(), 2);
        assert!(!out_dir.path().join(SITEMAP_FILE).exists());
        assert!(out_dir.path().join(MANIFEST_FILE).is_file());
    }

    #[test]
    fn test_write_to_reports_path_on_failure() {
        let project = tempfile::tempdir().unwrap();
        let blocker = project.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let output = SiteBuilder::new(mock_storage(), BuildOptions::default())
            .build()
            .unwrap();
        let err = output.write_to(&blocker.join("out")).unwrap_err();

        assert!(matches!(err, BuildError::Write { ref path, .. } if path.ends_with("out")));
    }
}
