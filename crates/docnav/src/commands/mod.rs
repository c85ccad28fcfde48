//! CLI command implementations.

mod build;
mod render;
mod resolve;

use docnav_config::Config;
use docnav_site::{MANIFEST_FILE, RouteRegistry, RouteTree};

use crate::error::CliError;

pub(crate) use build::BuildArgs;
pub(crate) use render::RenderArgs;
pub(crate) use resolve::ResolveArgs;

/// Load the route registry from the manifest written by `docnav build`.
fn load_registry(config: &Config) -> Result<RouteRegistry, CliError> {
    let path = config.docs_resolved.output_dir.join(MANIFEST_FILE);
    let json = std::fs::read_to_string(&path).map_err(|source| CliError::Manifest {
        path: path.clone(),
        source,
    })?;
    let tree = RouteTree::from_manifest(&json)?;
    let registry = RouteRegistry::from_tree(&tree);
    tracing::debug!(path = %path.display(), routes = registry.len(), "Loaded route manifest");
    Ok(registry)
}
