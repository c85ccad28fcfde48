//! Injection placeholders for embedded components.
//!
//! Rendered HTML may contain `<!-- INJECT:"key" -->` markers, optionally
//! followed by a layout (`heading` or `fullscreen`). Splitting the HTML at
//! those markers yields an ordered list of [`ContentBlock`]s the viewer
//! renders one after another.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

static INJECT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<!-- INJECT:"([^"\[]+)"( heading| fullscreen)? -->"#).unwrap()
});

/// How an embedded component is laid out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmbedLayout {
    /// Inline with the surrounding text.
    #[default]
    Inline,
    /// Rendered as a demo heading block.
    Heading,
    /// Takes the full viewport width.
    Fullscreen,
}

impl EmbedLayout {
    fn from_marker(marker: Option<&str>) -> Self {
        match marker.map(str::trim) {
            Some("heading") => Self::Heading,
            Some("fullscreen") => Self::Fullscreen,
            _ => Self::Inline,
        }
    }
}

/// A piece of rendered document content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentBlock {
    /// Rendered HTML.
    RawHtml(String),
    /// A registered component embedded at this position.
    Embedded {
        /// Component key.
        key: String,
        /// Layout requested by the placeholder.
        layout: EmbedLayout,
    },
}

/// Keys of the components a viewer can embed.
#[derive(Clone, Debug, Default)]
pub struct ComponentRegistry {
    keys: BTreeSet<String>,
}

impl ComponentRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component key.
    #[must_use]
    pub fn with_component(mut self, key: impl Into<String>) -> Self {
        self.keys.insert(key.into());
        self
    }

    /// True if `key` names a registered component.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }
}

impl<S: Into<String>> FromIterator<S> for ComponentRegistry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Split rendered HTML at injection placeholders.
///
/// Placeholders naming unregistered components produce nothing. With
/// `text_only`, every embedded component is dropped.
pub fn split_content(
    html: &str,
    components: &ComponentRegistry,
    text_only: bool,
) -> Vec<ContentBlock> {
    let mut blocks = Vec::new();
    let mut last = 0;

    for caps in INJECT_PATTERN.captures_iter(html) {
        let (Some(whole), Some(key)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_html(&mut blocks, &html[last..whole.start()]);
        last = whole.end();

        let key = key.as_str();
        if !components.contains(key) {
            tracing::debug!(key, "Skipping placeholder for unknown component");
            continue;
        }
        if text_only {
            continue;
        }
        blocks.push(ContentBlock::Embedded {
            key: key.to_owned(),
            layout: EmbedLayout::from_marker(caps.get(2).map(|m| m.as_str())),
        });
    }
    push_html(&mut blocks, &html[last..]);

    blocks
}

fn push_html(blocks: &mut Vec<ContentBlock>, html: &str) {
    if !html.is_empty() {
        blocks.push(ContentBlock::RawHtml(html.to_owned()));
    }
}
