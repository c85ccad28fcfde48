//! CLI error types.

use docnav_config::ConfigError;
use docnav_site::BuildError;
use docnav_storage::StorageError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Build(#[from] BuildError),

    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("Failed to read route manifest {}: {source}", path.display())]
    Manifest {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No route matches `{0}`")]
    Unresolved(String),

    #[error("Route not found: {0}")]
    RouteNotFound(String),

    #[error("Route {0} has no document")]
    NotADocument(String),
}
