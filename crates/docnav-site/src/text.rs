//! Text transformations shared by the tree builder, sitemap and registry.

/// Convert a path segment or title to a display name.
///
/// Splits on `-`, `_` and whitespace, then capitalizes the first letter of
/// each word. The rest of each word is kept as written.
///
/// # Examples
///
/// ```
/// use docnav_site::humanize;
///
/// assert_eq!(humanize("guides"), "Guides");
/// assert_eq!(humanize("setup-guide"), "Setup Guide");
/// assert_eq!(humanize("Getting Started"), "Getting Started");
/// ```
pub fn humanize(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for word in text
        .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|w| !w.is_empty())
    {
        if !result.is_empty() {
            result.push(' ');
        }
        capitalize_first_into(word, &mut result);
    }
    result
}

/// Capitalize the first character of a word, appending to `buf`.
fn capitalize_first_into(word: &str, buf: &mut String) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        buf.extend(first.to_uppercase());
        buf.push_str(chars.as_str());
    }
}

/// Split text into lower-cased words.
///
/// Word boundaries are non-alphanumeric characters and lower-to-upper case
/// transitions (`fooBar` is two words).
fn words(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in text.chars() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_lowercase() || c.is_numeric();
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Words that can't be used as binding names in an ES module.
const JS_RESERVED_WORDS: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false", "finally",
    "for", "function", "if", "implements", "import", "in", "instanceof", "interface", "let",
    "new", "null", "package", "private", "protected", "public", "return", "static", "super",
    "switch", "this", "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// Derive a code-safe identifier from path segments and a title.
///
/// The parts are split into words, lower-cased and joined in camel case, so
/// `["guides"] + "Getting Started"` becomes `guidesGettingStarted`. Case,
/// hyphens and spaces do not affect the result. Identifiers that would start
/// with a digit or collide with a JavaScript reserved word are prefixed with
/// `_`.
///
/// # Examples
///
/// ```
/// use docnav_site::identifier;
///
/// assert_eq!(identifier(&["guides".to_owned()], "Getting Started"), "guidesGettingStarted");
/// assert_eq!(identifier(&[], "getting-started"), "gettingStarted");
/// ```
pub fn identifier(segments: &[String], title: &str) -> String {
    let mut result = String::new();
    let all_words = segments
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(title))
        .flat_map(words);

    for word in all_words {
        if result.is_empty() {
            result.push_str(&word);
        } else {
            capitalize_first_into(&word, &mut result);
        }
    }

    match result.chars().next() {
        None => "_".to_owned(),
        Some(c) if c.is_numeric() => format!("_{result}"),
        Some(_) if JS_RESERVED_WORDS.contains(&result.as_str()) => format!("_{result}"),
        Some(_) => result,
    }
}

/// Convert a title to a URL-safe slug.
///
/// Lower-cases the text and collapses every run of characters that are not
/// alphanumeric into a single hyphen. Leading and trailing hyphens are
/// dropped.
///
/// # Examples
///
/// ```
/// use docnav_site::slugify;
///
/// assert_eq!(slugify("My Guide"), "my-guide");
/// assert_eq!(slugify("  What's new?  "), "what-s-new");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug
}
