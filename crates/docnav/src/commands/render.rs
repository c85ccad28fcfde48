//! `docnav render` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use docnav_config::Config;
use docnav_renderer::{
    ComponentRegistry, ContentBlock, EmbedLayout, HttpFetcher, MarkdownDocument, MarkdownRenderer,
    escape_html,
};
use docnav_storage::{FsStorage, Storage};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Route path of the document (e.g., "/documentation/guides/intro").
    route: String,

    /// Drop headings, code blocks, lists and embedded components.
    #[arg(long)]
    text_only: bool,

    /// Component key available for injection (repeatable).
    #[arg(long = "component", value_name = "KEY")]
    components: Vec<String>,

    /// Load markdown from this URL, falling back to the local file.
    #[arg(long)]
    source_url: Option<String>,

    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl RenderArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;
        let registry = super::load_registry(&config)?;

        let route = registry
            .get(&self.route)
            .ok_or_else(|| CliError::RouteNotFound(self.route.clone()))?;
        let file_location = route
            .file_location
            .as_deref()
            .ok_or_else(|| CliError::NotADocument(self.route.clone()))?;

        let storage = FsStorage::new(config.docs_resolved.project_dir.clone());
        let local = storage.read(Path::new(file_location.trim_start_matches('/')))?;
        let mut document = MarkdownDocument::new(local);
        if let Some(url) = self.source_url {
            document = document.with_source_url(url);
            if !document.refresh(&HttpFetcher::new()) {
                output.warning("Remote markdown unavailable, rendering local copy");
            }
        }

        let components: ComponentRegistry = self.components.into_iter().collect();
        let renderer = MarkdownRenderer::new(&registry)
            .with_history(config.site.history)
            .with_text_only(self.text_only)
            .with_edit_url_base(config.project.edit_url_base());
        let blocks = renderer.render(
            document.markdown(),
            &route.path,
            Some(file_location),
            &components,
        );

        for block in &blocks {
            output.result(&block_html(block));
        }
        Ok(())
    }
}

/// HTML for a content block; embedded components become mount points.
fn block_html(block: &ContentBlock) -> String {
    match block {
        ContentBlock::RawHtml(html) => html.trim_end().to_owned(),
        ContentBlock::Embedded { key, layout } => {
            let class = match layout {
                EmbedLayout::Inline => "inline-code container",
                EmbedLayout::Heading => "demo",
                EmbedLayout::Fullscreen => "fullscreen",
            };
            format!(
                "<div class=\"{class}\" data-component=\"{}\"></div>",
                escape_html(key)
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_block_html_raw() {
        let block = ContentBlock::RawHtml("<p>Hi</p>\n".to_owned());

        assert_eq!(block_html(&block), "<p>Hi</p>");
    }

    #[test]
    fn test_block_html_embedded_layouts() {
        let embedded = |layout| ContentBlock::Embedded {
            key: "button".to_owned(),
            layout,
        };

        assert_eq!(
            block_html(&embedded(EmbedLayout::Inline)),
            "<div class=\"inline-code container\" data-component=\"button\"></div>"
        );
        assert_eq!(
            block_html(&embedded(EmbedLayout::Heading)),
            "<div class=\"demo\" data-component=\"button\"></div>"
        );
        assert_eq!(
            block_html(&embedded(EmbedLayout::Fullscreen)),
            "<div class=\"fullscreen\" data-component=\"button\"></div>"
        );
    }
}
