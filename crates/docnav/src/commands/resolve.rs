//! `docnav resolve` command implementation.

use std::path::PathBuf;

use clap::Args;
use docnav_config::Config;
use docnav_site::ClosestRouteResolver;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// Link target as written in markdown (e.g., "components/button.md").
    target: String,

    /// Route path of the linking document.
    #[arg(long, default_value = "")]
    from: String,

    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ResolveArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref(), None)?;
        let registry = super::load_registry(&config)?;

        let route = ClosestRouteResolver::new(&registry)
            .resolve(&self.target, &self.from)
            .ok_or_else(|| CliError::Unresolved(self.target.clone()))?;

        Output::new().result(&route.path);
        Ok(())
    }
}
