//! Documentation tree scanning and route generation for docnav.
//!
//! This crate turns a directory of markdown files into the artifacts a
//! single-page documentation viewer needs:
//! - [`DocScanner`]: walks the source directory and extracts titles
//! - [`RouteTreeBuilder`]: groups documents into a navigation tree
//! - [`RouteTree::to_module`]: emits the importable routes module
//! - [`SitemapGenerator`]: emits sitemap XML
//! - [`RouteRegistry`] and [`ClosestRouteResolver`]: resolve in-document links
//!
//! [`SiteBuilder`] runs the whole pipeline.
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::{Path, PathBuf};
//! use std::sync::Arc;
//! use docnav_site::{BuildOptions, SiteBuilder};
//! use docnav_storage::FsStorage;
//!
//! let storage = Arc::new(FsStorage::new(PathBuf::from(".")));
//! let output = SiteBuilder::new(storage, BuildOptions::default()).build()?;
//! output.write_to(Path::new(".docnav"))?;
//! # Ok(())
//! # }
//! ```

mod builder;
mod entry;
mod error;
mod literal;
mod registry;
mod resolver;
mod route_tree;
mod scanner;
mod sitemap;
mod text;

pub use builder::{
    BuildOptions, BuildOutput, MANIFEST_FILE, ROUTES_MODULE_FILE, SITEMAP_FILE, SiteBuilder,
};
pub use entry::{DocEntry, DocSet};
pub use error::BuildError;
pub use literal::Literal;
pub use registry::{Route, RouteRegistry};
pub use resolver::{ClosestRouteResolver, link_candidate};
pub use route_tree::{
    ContentBinding, DOCUMENTATION_NAME, DOCUMENTATION_PATH, ROUTE_PREFIX, RouteItem, RouteLeaf,
    RouteNode, RouteTree, RouteTreeBuilder,
};
pub use scanner::{DEFAULT_TITLE_FILE, DocScanner};
pub use sitemap::{SitemapEntry, SitemapGenerator};
pub use text::{humanize, identifier, slugify};
