//! Build error types.

use std::path::PathBuf;

use docnav_storage::StorageError;

/// Error returned when building the documentation artifacts.
///
/// Every variant is fatal: no artifact is written once one is returned.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// A directory couldn't be listed or a file couldn't be read.
    #[error("Failed to scan documentation: {0}")]
    Scan(#[from] StorageError),
    /// Two documents derive the same content identifier.
    #[error("Identifier collision: `{identifier}` is derived from both {first} and {second}")]
    IdentifierCollision {
        /// The duplicated identifier.
        identifier: String,
        /// Source path of the first document.
        first: String,
        /// Source path of the second document.
        second: String,
    },
    /// Route manifest (de)serialization failed.
    #[error("Route manifest error: {0}")]
    Manifest(#[from] serde_json::Error),
    /// Sitemap XML couldn't be written.
    #[error("Sitemap error: {0}")]
    Sitemap(String),
    /// An artifact couldn't be written to disk.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// Artifact path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
