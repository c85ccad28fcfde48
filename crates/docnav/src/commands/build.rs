//! `docnav build` command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use docnav_config::{CliSettings, Config};
use docnav_site::{BuildOptions, SiteBuilder};
use docnav_storage::{FsStorage, Storage};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown source directory, relative to the project (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory for generated artifacts (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Public base URL for the sitemap (overrides config).
    #[arg(long, env = "DOCNAV_BASE_URL")]
    base_url: Option<String>,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
            base_url: self.base_url,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let docs = &config.docs_resolved;

        output.info(&format!(
            "Source: {}",
            docs.project_dir.join(&docs.source_dir).display()
        ));
        output.info(&format!("Output: {}", docs.output_dir.display()));

        let storage: Arc<dyn Storage> = Arc::new(FsStorage::new(docs.project_dir.clone()));
        let options = BuildOptions {
            source_dir: docs.source_dir.clone(),
            title_file: docs.title_file.clone(),
            base_url: config.site.base_url.clone(),
        };

        let built = SiteBuilder::new(storage, options).build()?;
        if built.sitemap.is_none() {
            output.warning("No base URL configured, skipping sitemap");
        }
        built.write_to(&docs.output_dir)?;

        output.success(&format!(
            "Built {} documents to {}",
            built.docs.len(),
            docs.output_dir.display()
        ));
        Ok(())
    }
}
