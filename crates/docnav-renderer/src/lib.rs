//! Markdown rendering with route-aware link rewriting.
//!
//! [`MarkdownRenderer`] turns a document into HTML for the viewer:
//! - relative links are resolved to the closest route
//! - an edit-source link is prepended for GitHub projects
//! - text-only mode strips structure for previews
//! - `<!-- INJECT:"key" -->` placeholders become [`ContentBlock::Embedded`]
//!
//! Remote documents are loaded through a [`ContentFetcher`] and wrapped in a
//! [`MarkdownDocument`], which keeps stale content when a refresh fails.
//!
//! # Example
//!
//! ```
//! use docnav_renderer::MarkdownRenderer;
//! use docnav_site::{Route, RouteRegistry};
//!
//! let registry = RouteRegistry::from_routes([Route::new("/documentation/faq", "FAQ")]);
//! let html = MarkdownRenderer::new(&registry).render_html("[FAQ](faq.md)", "", None);
//! assert!(html.contains("href=\"/#/documentation/faq\""));
//! ```

mod document;
mod fetch;
mod inject;
mod link;
mod renderer;

pub use document::MarkdownDocument;
pub use fetch::{ContentFetcher, FetchError, HttpFetcher};
pub use inject::{ComponentRegistry, ContentBlock, EmbedLayout, split_content};
pub use link::{edit_url, escape_html, route_href};
pub use renderer::MarkdownRenderer;
