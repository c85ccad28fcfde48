//! Markdown to HTML with route-aware links.

use docnav_config::HistoryMode;
use docnav_site::{ClosestRouteResolver, RouteRegistry};
use pulldown_cmark::{CowStr, Event, LinkType, Options, Parser, Tag, TagEnd};

use crate::inject::{ComponentRegistry, ContentBlock, split_content};
use crate::link::{edit_link_html, escape_html, is_external, route_href};

/// Link text (lowercased) marking a source-code link hidden in text-only mode.
const VIEW_CODE_TEXT: &str = "view code";

/// Renders documents for the viewer.
///
/// Links are rewritten through a [`ClosestRouteResolver`]; everything else
/// follows GitHub Flavored Markdown.
#[derive(Debug)]
pub struct MarkdownRenderer<'r> {
    resolver: ClosestRouteResolver<'r>,
    history: HistoryMode,
    text_only: bool,
    edit_url_base: Option<String>,
    image_prefix: Option<(String, String)>,
}

/// Link being collected until its end tag.
struct PendingLink<'a> {
    open: String,
    text: String,
    events: Vec<Event<'a>>,
}

impl<'r> MarkdownRenderer<'r> {
    /// Create a renderer resolving links against `registry`.
    #[must_use]
    pub fn new(registry: &'r RouteRegistry) -> Self {
        Self {
            resolver: ClosestRouteResolver::new(registry),
            history: HistoryMode::default(),
            text_only: false,
            edit_url_base: None,
            image_prefix: None,
        }
    }

    /// Set how resolved links are routed.
    #[must_use]
    pub fn with_history(mut self, history: HistoryMode) -> Self {
        self.history = history;
        self
    }

    /// Drop headings, code blocks, lists, "view code" links and embedded
    /// components.
    #[must_use]
    pub fn with_text_only(mut self, text_only: bool) -> Self {
        self.text_only = text_only;
        self
    }

    /// Prefix output with an edit link under this project URL.
    #[must_use]
    pub fn with_edit_url_base(mut self, url: Option<impl Into<String>>) -> Self {
        self.edit_url_base = url.map(Into::into);
        self
    }

    /// Rewrite image URLs starting with `from` to start with `to` instead.
    #[must_use]
    pub fn with_image_prefix(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.image_prefix = Some((from.into(), to.into()));
        self
    }

    fn parser_options() -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM
    }

    /// Render `markdown` to HTML.
    ///
    /// `current_path` is the route path of the document, used to pick the
    /// closest route for each link. `file_location` enables the edit link.
    pub fn render_html(
        &self,
        markdown: &str,
        current_path: &str,
        file_location: Option<&str>,
    ) -> String {
        let parser = Parser::new_ext(markdown, Self::parser_options());
        let events = self.rewrite_events(parser, current_path);

        let mut html = String::with_capacity(markdown.len() * 3 / 2);
        if let (Some(base), Some(location)) = (self.edit_url_base.as_deref(), file_location) {
            html.push_str(&edit_link_html(base, location));
        }
        pulldown_cmark::html::push_html(&mut html, events.into_iter());
        html
    }

    /// Render `markdown` and split it into content blocks.
    pub fn render(
        &self,
        markdown: &str,
        current_path: &str,
        file_location: Option<&str>,
        components: &ComponentRegistry,
    ) -> Vec<ContentBlock> {
        let html = self.render_html(markdown, current_path, file_location);
        split_content(&html, components, self.text_only)
    }

    fn rewrite_events<'a>(&self, parser: Parser<'a>, current_path: &str) -> Vec<Event<'a>> {
        let mut out = Vec::new();
        let mut skip_depth = 0usize;
        let mut link: Option<PendingLink<'a>> = None;

        for event in parser {
            if skip_depth > 0 {
                match event {
                    Event::Start(_) => skip_depth += 1,
                    Event::End(_) => skip_depth -= 1,
                    _ => {}
                }
                continue;
            }

            match event {
                Event::Start(ref tag) if self.text_only && is_text_only_dropped(tag) => {
                    skip_depth = 1;
                }
                Event::Start(Tag::Link {
                    link_type,
                    dest_url,
                    title,
                    ..
                }) => {
                    let open = if link_type == LinkType::Email {
                        external_anchor(&format!("mailto:{dest_url}"), &title)
                    } else {
                        self.open_anchor(&dest_url, &title, current_path)
                    };
                    link = Some(PendingLink {
                        open,
                        text: String::new(),
                        events: Vec::new(),
                    });
                }
                Event::End(TagEnd::Link) => {
                    if let Some(pending) = link.take() {
                        self.close_link(pending, &mut out);
                    }
                }
                Event::Start(Tag::Image {
                    link_type,
                    dest_url,
                    title,
                    id,
                }) => {
                    let dest_url = self.rewrite_image(dest_url);
                    sink(&mut out, &mut link).push(Event::Start(Tag::Image {
                        link_type,
                        dest_url,
                        title,
                        id,
                    }));
                }
                other => {
                    if let (Some(pending), Event::Text(text) | Event::Code(text)) =
                        (link.as_mut(), &other)
                    {
                        pending.text.push_str(text);
                    }
                    sink(&mut out, &mut link).push(other);
                }
            }
        }

        out
    }

    fn close_link<'a>(&self, pending: PendingLink<'a>, out: &mut Vec<Event<'a>>) {
        if self.text_only && pending.text.to_lowercase().contains(VIEW_CODE_TEXT) {
            return;
        }
        out.push(Event::InlineHtml(pending.open.into()));
        out.extend(pending.events);
        out.push(Event::InlineHtml(CowStr::Borrowed("</a>")));
    }

    /// Opening `<a>` tag for a link target.
    fn open_anchor(&self, href: &str, title: &str, current_path: &str) -> String {
        if !is_external(href)
            && let Some(route) = self.resolver.resolve(href, current_path)
        {
            let history_attr = match self.history {
                HistoryMode::Browser => " data-use-history",
                HistoryMode::Hash => "",
            };
            let target = route_href(&route.path, self.history);
            return format!(
                "<a{history_attr} href=\"{}\"{}>",
                escape_html(&target),
                title_attr(title)
            );
        }

        external_anchor(href, title)
    }

    fn rewrite_image<'a>(&self, dest_url: CowStr<'a>) -> CowStr<'a> {
        match &self.image_prefix {
            Some((from, to)) if dest_url.starts_with(from.as_str()) => {
                CowStr::from(format!("{to}{}", &dest_url[from.len()..]))
            }
            _ => dest_url,
        }
    }
}

/// Opening `<a>` tag for a link left as written.
fn external_anchor(href: &str, title: &str) -> String {
    format!("<a href=\"{}\"{}>", escape_html(href), title_attr(title))
}

fn title_attr(title: &str) -> String {
    if title.is_empty() {
        String::new()
    } else {
        format!(" title=\"{}\"", escape_html(title))
    }
}

/// Where the next event goes: the open link, or the output.
fn sink<'b, 'a>(
    out: &'b mut Vec<Event<'a>>,
    link: &'b mut Option<PendingLink<'a>>,
) -> &'b mut Vec<Event<'a>> {
    match link {
        Some(pending) => &mut pending.events,
        None => out,
    }
}

fn is_text_only_dropped(tag: &Tag<'_>) -> bool {
    matches!(
        tag,
        Tag::Heading { .. } | Tag::CodeBlock(_) | Tag::List(_)
    )
}

#[cfg(test)]
mod tests {
    use docnav_site::Route;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::inject::EmbedLayout;

    fn registry(paths: &[&str]) -> RouteRegistry {
        RouteRegistry::from_routes(paths.iter().map(|p| Route::new(*p, *p)))
    }

    #[test]
    fn test_resolved_link_hash_mode() {
        let routes = registry(&["/documentation/guides/intro"]);

        let html = MarkdownRenderer::new(&routes).render_html("[Intro](intro.md)", "", None);

        assert_eq!(
            html,
            "<p><a href=\"/#/documentation/guides/intro\">Intro</a></p>\n"
        );
    }

    #[test]
    fn test_resolved_link_browser_mode() {
        let routes = registry(&["/documentation/guides/intro"]);

        let html = MarkdownRenderer::new(&routes)
            .with_history(HistoryMode::Browser)
            .render_html("[Intro](../guides/intro.md)", "", None);

        assert_eq!(
            html,
            "<p><a data-use-history href=\"/documentation/guides/intro\">Intro</a></p>\n"
        );
    }

    #[test]
    fn test_pass_through_links() {
        let routes = registry(&["/documentation/intro"]);
        let renderer = MarkdownRenderer::new(&routes);

        for href in [
            "https://example.com/intro.md",
            "mailto:docs@example.com",
            "#intro",
            "missing.md",
        ] {
            let html = renderer.render_html(&format!("[x]({href})"), "", None);
            assert_eq!(html, format!("<p><a href=\"{href}\">x</a></p>\n"));
        }
    }

    #[test]
    fn test_email_autolink_keeps_mailto() {
        let routes = registry(&["/documentation/docs@example.com"]);

        let html = MarkdownRenderer::new(&routes).render_html("Mail <docs@example.com>", "", None);

        assert_eq!(
            html,
            "<p>Mail <a href=\"mailto:docs@example.com\">docs@example.com</a></p>\n"
        );
    }

    #[test]
    fn test_link_title_and_inline_markup() {
        let routes = registry(&["/documentation/intro"]);

        let html = MarkdownRenderer::new(&routes).render_html(
            "[the *intro*](intro.md \"Start here\")",
            "",
            None,
        );

        assert_eq!(
            html,
            "<p><a href=\"/#/documentation/intro\" title=\"Start here\">the <em>intro</em></a></p>\n"
        );
    }

    #[test]
    fn test_closest_route_uses_current_path() {
        let routes = registry(&["/docs/legacy/button", "/docs/components/button"]);

        let html = MarkdownRenderer::new(&routes).render_html(
            "[Button](button.md)",
            "/docs/components/card",
            None,
        );

        assert!(html.contains("href=\"/#/docs/components/button\""));
    }

    #[test]
    fn test_text_only_drops_structure() {
        let routes = RouteRegistry::default();
        let markdown = "# Title\n\nPara\n\n- a\n- b\n\n```rust\nfn main() {}\n```\n";

        let html = MarkdownRenderer::new(&routes)
            .with_text_only(true)
            .render_html(markdown, "", None);

        assert_eq!(html, "<p>Para</p>\n");
    }

    #[test]
    fn test_text_only_drops_view_code_links() {
        let routes = registry(&["/documentation/intro"]);
        let markdown = "See [View Code](https://github.com/x) and [Intro](intro.md).";

        let full = MarkdownRenderer::new(&routes).render_html(markdown, "", None);
        let text = MarkdownRenderer::new(&routes)
            .with_text_only(true)
            .render_html(markdown, "", None);

        assert!(full.contains("View Code"));
        assert_eq!(
            text,
            "<p>See  and <a href=\"/#/documentation/intro\">Intro</a>.</p>\n"
        );
    }

    #[test]
    fn test_edit_link() {
        let routes = RouteRegistry::default();
        let renderer =
            MarkdownRenderer::new(&routes).with_edit_url_base(Some("https://github.com/org/repo"));

        let with_location = renderer.render_html("Body", "", Some("/src/docs/a.md"));
        let without_location = renderer.render_html("Body", "", None);

        assert_eq!(
            with_location,
            "<div class=\"edit-me\"><a href=\"https://github.com/org/repo/edit/master/src/docs/a.md\">Edit me on GitHub</a></div>\n<p>Body</p>\n"
        );
        assert_eq!(without_location, "<p>Body</p>\n");
    }

    #[test]
    fn test_no_edit_link_without_base() {
        let routes = RouteRegistry::default();

        let html = MarkdownRenderer::new(&routes)
            .with_edit_url_base(None::<String>)
            .render_html("Body", "", Some("/src/docs/a.md"));

        assert_eq!(html, "<p>Body</p>\n");
    }

    #[test]
    fn test_image_prefix_rewrite() {
        let routes = RouteRegistry::default();

        let html = MarkdownRenderer::new(&routes)
            .with_image_prefix("/demo/src/static/images", "images")
            .render_html("![logo](/demo/src/static/images/logo.png)", "", None);

        assert_eq!(html, "<p><img src=\"images/logo.png\" alt=\"logo\" /></p>\n");
    }

    #[test]
    fn test_render_blocks_with_component() {
        let routes = RouteRegistry::default();
        let components = ComponentRegistry::new().with_component("button");
        let markdown = "Intro\n\n<!-- INJECT:\"button\" heading -->\n\nOutro\n";

        let blocks = MarkdownRenderer::new(&routes).render(markdown, "", None, &components);

        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0], ContentBlock::RawHtml("<p>Intro</p>\n".to_owned()));
        assert_eq!(
            blocks[1],
            ContentBlock::Embedded {
                key: "button".to_owned(),
                layout: EmbedLayout::Heading,
            }
        );
        assert!(matches!(&blocks[2], ContentBlock::RawHtml(html) if html.contains("<p>Outro</p>")));
    }

    #[test]
    fn test_render_blocks_text_only_drops_component() {
        let routes = RouteRegistry::default();
        let components = ComponentRegistry::new().with_component("button");
        let markdown = "Intro\n\n<!-- INJECT:\"button\" -->\n";

        let blocks = MarkdownRenderer::new(&routes)
            .with_text_only(true)
            .render(markdown, "", None, &components);

        assert!(blocks.iter().all(|b| matches!(b, ContentBlock::RawHtml(_))));
    }
}
