//! Link helpers: route hrefs, edit-source links and escaping.

use docnav_config::HistoryMode;

/// Prefix marking a hash-routed path.
const HASH_PREFIX: &str = "/#";

/// Branch edit links point at.
const EDIT_BRANCH: &str = "master";

/// Escape text for use in HTML content or attribute values.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// True for links the resolver never touches.
///
/// Covers absolute URLs with a scheme, `mailto:` links and pure fragments.
pub(crate) fn is_external(href: &str) -> bool {
    href.contains("://") || href.starts_with("mailto:") || href.starts_with('#')
}

/// Href for a resolved route in the given history mode.
///
/// # Examples
///
/// ```
/// use docnav_config::HistoryMode;
/// use docnav_renderer::route_href;
///
/// assert_eq!(route_href("/documentation/faq", HistoryMode::Hash), "/#/documentation/faq");
/// assert_eq!(route_href("/#/documentation/faq", HistoryMode::Hash), "/#/documentation/faq");
/// assert_eq!(route_href("/documentation/faq", HistoryMode::Browser), "/documentation/faq");
/// ```
pub fn route_href(route_path: &str, history: HistoryMode) -> String {
    match history {
        HistoryMode::Hash if !route_path.starts_with(HASH_PREFIX) => {
            format!("{HASH_PREFIX}{route_path}")
        }
        _ => route_path.to_owned(),
    }
}

/// Edit URL for a source file under a project URL.
///
/// Runs of `/` collapse to one, except in the scheme separator.
///
/// # Examples
///
/// ```
/// use docnav_renderer::edit_url;
///
/// assert_eq!(
///     edit_url("https://github.com/org/repo/", "/src/docs/intro.md"),
///     "https://github.com/org/repo/edit/master/src/docs/intro.md"
/// );
/// ```
pub fn edit_url(project_url: &str, file_location: &str) -> String {
    let raw = format!("{project_url}/edit/{EDIT_BRANCH}/{file_location}");
    let (scheme, rest) = match raw.split_once("://") {
        Some((scheme, rest)) => (Some(scheme), rest),
        None => (None, raw.as_str()),
    };

    let mut collapsed = String::with_capacity(raw.len());
    if let Some(scheme) = scheme {
        collapsed.push_str(scheme);
        collapsed.push_str("://");
    }
    let mut previous_slash = false;
    for c in rest.chars() {
        if c == '/' && previous_slash {
            continue;
        }
        previous_slash = c == '/';
        collapsed.push(c);
    }
    collapsed
}

/// The "Edit me on GitHub" block placed above a rendered document.
pub(crate) fn edit_link_html(project_url: &str, file_location: &str) -> String {
    format!(
        "<div class=\"edit-me\"><a href=\"{}\">Edit me on GitHub</a></div>\n",
        escape_html(&edit_url(project_url, file_location))
    )
}
