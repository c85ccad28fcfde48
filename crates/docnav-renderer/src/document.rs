//! Documents whose markdown may live at a remote URL.

use crate::fetch::ContentFetcher;

/// Markdown content with an optional remote source.
///
/// The document starts with its initial markdown (possibly empty) and
/// replaces it on a successful [`refresh`](Self::refresh). A failed refresh
/// keeps whatever was there before.
#[derive(Clone, Debug, Default)]
pub struct MarkdownDocument {
    markdown: String,
    source_url: Option<String>,
}

impl MarkdownDocument {
    /// Create a document from local markdown.
    pub fn new(markdown: impl Into<String>) -> Self {
        Self {
            markdown: markdown.into(),
            source_url: None,
        }
    }

    /// Load content from `url` on refresh.
    #[must_use]
    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    /// Current markdown.
    #[must_use]
    pub fn markdown(&self) -> &str {
        &self.markdown
    }

    /// Remote source URL, if any.
    #[must_use]
    pub fn source_url(&self) -> Option<&str> {
        self.source_url.as_deref()
    }

    /// Reload markdown from the source URL.
    ///
    /// Returns `true` if the content was replaced. Without a source URL this
    /// is a no-op.
    pub fn refresh(&mut self, fetcher: &dyn ContentFetcher) -> bool {
        let Some(url) = self.source_url.as_deref() else {
            return false;
        };
        match fetcher.fetch(url) {
            Ok(markdown) => {
                tracing::debug!(url, bytes = markdown.len(), "Fetched remote markdown");
                self.markdown = markdown;
                true
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "Keeping stale markdown");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::fetch::FetchError;

    struct StubFetcher {
        responses: Mutex<Vec<Result<String, FetchError>>>,
    }

    impl StubFetcher {
        fn new(mut responses: Vec<Result<String, FetchError>>) -> Self {
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
            }
        }
    }

    impl ContentFetcher for StubFetcher {
        fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.responses
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| {
                    Err(FetchError::Status {
                        url: url.to_owned(),
                        status: 500,
                    })
                })
        }
    }

    fn unavailable() -> FetchError {
        FetchError::Status {
            url: "https://example.com/a.md".to_owned(),
            status: 503,
        }
    }

    #[test]
    fn test_refresh_replaces_content() {
        let fetcher = StubFetcher::new(vec![Ok("# Remote".to_owned())]);
        let mut doc = MarkdownDocument::new("").with_source_url("https://example.com/a.md");

        assert!(doc.refresh(&fetcher));
        assert_eq!(doc.markdown(), "# Remote");
    }

    #[test]
    fn test_failed_refresh_keeps_stale_content() {
        let fetcher = StubFetcher::new(vec![Ok("# First".to_owned()), Err(unavailable())]);
        let mut doc = MarkdownDocument::new("# Local").with_source_url("https://example.com/a.md");

        assert!(doc.refresh(&fetcher));
        assert!(!doc.refresh(&fetcher));
        assert_eq!(doc.markdown(), "# First");
    }

    #[test]
    fn test_failed_first_refresh_keeps_initial_content() {
        let fetcher = StubFetcher::new(vec![Err(unavailable())]);
        let mut doc = MarkdownDocument::new("# Local").with_source_url("https://example.com/a.md");

        assert!(!doc.refresh(&fetcher));
        assert_eq!(doc.markdown(), "# Local");
    }

    #[test]
    fn test_refresh_without_url_is_noop() {
        let fetcher = StubFetcher::new(vec![Ok("# Remote".to_owned())]);
        let mut doc = MarkdownDocument::new("# Local");

        assert!(!doc.refresh(&fetcher));
        assert_eq!(doc.markdown(), "# Local");
        assert!(doc.source_url().is_none());
    }
}
