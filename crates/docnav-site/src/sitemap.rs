//! XML sitemap generation.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::entry::DocSet;
use crate::error::BuildError;
use crate::route_tree::DOCUMENTATION_PATH;
use crate::text::{humanize, slugify};

/// Sitemap XML namespace.
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Priority of the site root entry.
const ROOT_PRIORITY: f32 = 1.0;

/// A single `<url>` entry.
#[derive(Clone, Debug, PartialEq)]
pub struct SitemapEntry {
    /// Absolute URL.
    pub loc: String,
    /// Optional crawl priority.
    pub priority: Option<f32>,
}

/// Generates sitemap entries and XML for a [`DocSet`].
#[derive(Debug)]
pub struct SitemapGenerator {
    base_url: String,
}

impl SitemapGenerator {
    /// Create a generator for the given public base URL.
    ///
    /// A trailing `/` on the base URL is ignored.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Absolute URL for an in-app route path.
    fn url(&self, route_path: &str) -> String {
        format!("{}/?p=/#{route_path}", self.base_url)
    }

    /// Sitemap entries: the site root first, then one entry per document.
    #[must_use]
    pub fn entries(&self, docs: &DocSet) -> Vec<SitemapEntry> {
        let root = SitemapEntry {
            loc: self.url("/"),
            priority: Some(ROOT_PRIORITY),
        };
        let documents = docs.entries().iter().map(|entry| {
            let mut path = DOCUMENTATION_PATH.to_owned();
            for segment in &entry.relative_path {
                path.push('/');
                path.push_str(segment);
            }
            path.push('/');
            path.push_str(&slugify(&humanize(&entry.title)));
            SitemapEntry {
                loc: self.url(&path),
                priority: None,
            }
        });
        std::iter::once(root).chain(documents).collect()
    }

    /// Render the sitemap document.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Sitemap`] if the XML writer fails.
    pub fn render(&self, docs: &DocSet) -> Result<String, BuildError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        emit(
            &mut writer,
            Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
        )?;
        emit(
            &mut writer,
            Event::Start(BytesStart::new("urlset").with_attributes([("xmlns", SITEMAP_NS)])),
        )?;
        for entry in self.entries(docs) {
            emit(&mut writer, Event::Start(BytesStart::new("url")))?;
            text_element(&mut writer, "loc", &entry.loc)?;
            if let Some(priority) = entry.priority {
                text_element(&mut writer, "priority", &priority.to_string())?;
            }
            emit(&mut writer, Event::End(BytesEnd::new("url")))?;
        }
        emit(&mut writer, Event::End(BytesEnd::new("urlset")))?;

        let mut xml = String::from_utf8(writer.into_inner())
            .map_err(|e| BuildError::Sitemap(e.to_string()))?;
        xml.push('\n');
        Ok(xml)
    }
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), BuildError> {
    writer
        .write_event(event)
        .map_err(|e| BuildError::Sitemap(e.to_string()))
}

fn text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<(), BuildError> {
    emit(writer, Event::Start(BytesStart::new(name)))?;
    emit(writer, Event::Text(BytesText::new(text)))?;
    emit(writer, Event::End(BytesEnd::new(name)))
}
