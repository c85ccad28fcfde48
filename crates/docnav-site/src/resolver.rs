//! Closest-route resolution for links embedded in markdown.
//!
//! A link such as `components/button.md` is reduced to the bare name
//! `button`, matched against every route in the registry, and, when several
//! routes match, disambiguated by path proximity to the linking document:
//! a route under the document's own location wins over one under an
//! ancestor, which wins over registry order.

use crate::registry::{Route, RouteRegistry};

/// Markdown file extension stripped from link targets.
const MARKDOWN_EXTENSION: &str = ".md";

/// Reduce a link target to the bare name used for matching.
///
/// Strips any path prefix and a trailing `.md`. Returns `None` when nothing
/// is left.
///
/// # Examples
///
/// ```
/// use docnav_site::link_candidate;
///
/// assert_eq!(link_candidate("../components/button.md"), Some("button"));
/// assert_eq!(link_candidate("button"), Some("button"));
/// assert_eq!(link_candidate("guides/"), None);
/// ```
pub fn link_candidate(target: &str) -> Option<&str> {
    let name = target.rsplit('/').next().unwrap_or(target);
    let name = name.strip_suffix(MARKDOWN_EXTENSION).unwrap_or(name);
    (!name.is_empty()).then_some(name)
}

/// Resolves link targets against an immutable [`RouteRegistry`].
#[derive(Clone, Copy, Debug)]
pub struct ClosestRouteResolver<'r> {
    registry: &'r RouteRegistry,
}

impl<'r> ClosestRouteResolver<'r> {
    /// Create a resolver over `registry`.
    #[must_use]
    pub fn new(registry: &'r RouteRegistry) -> Self {
        Self { registry }
    }

    /// Resolve `target` as linked from the document at `current_path`.
    ///
    /// `current_path` may be empty when the linking document is unknown.
    /// Returns `None` when no route matches; callers leave such links as
    /// written.
    #[must_use]
    pub fn resolve(&self, target: &str, current_path: &str) -> Option<&'r Route> {
        let name = link_candidate(target)?;
        let candidates: Vec<&'r Route> = self
            .registry
            .iter()
            .filter(|route| route.has_segment(name))
            .collect();

        match candidates.as_slice() {
            [] => {
                tracing::debug!(link = target, "No route matches link");
                None
            }
            [only] => Some(*only),
            _ => Some(closest(name, &candidates, current_path)),
        }
    }
}

/// Pick the candidate closest to `search_path`.
///
/// Checks `<search_path>/<name>`, then narrows `search_path` one segment at a
/// time. Once the path is empty, prefers a candidate containing `/<name>` and
/// finally the first candidate. Runs at most `depth(search_path) + 1` checks.
fn closest<'r>(name: &str, candidates: &[&'r Route], search_path: &str) -> &'r Route {
    let mut search_path = search_path.trim_end_matches('/');

    while !search_path.is_empty() {
        let needle = format!("{search_path}/{name}");
        if let Some(route) = candidates.iter().copied().find(|r| r.path.contains(&needle)) {
            return route;
        }
        search_path = parent_path(search_path);
    }

    let needle = format!("/{name}");
    candidates
        .iter()
        .copied()
        .find(|r| r.path.contains(&needle))
        .unwrap_or(candidates[0])
}

/// Drop the last segment of a path (`/a/b` -> `/a`, `/a` -> ``).
fn parent_path(path: &str) -> &str {
    path.rsplit_once('/').map_or("", |(parent, _)| parent)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(paths: &[&str]) -> RouteRegistry {
        RouteRegistry::from_routes(paths.iter().map(|p| Route::new(*p, *p)))
    }

    fn resolve<'r>(registry: &'r RouteRegistry, target: &str, from: &str) -> Option<&'r str> {
        ClosestRouteResolver::new(registry)
            .resolve(target, from)
            .map(|r| r.path.as_str())
    }

    #[test]
    fn test_link_candidate() {
        assert_eq!(link_candidate("components/button.md"), Some("button"));
        assert_eq!(link_candidate("./intro.md"), Some("intro"));
        assert_eq!(link_candidate("intro"), Some("intro"));
        assert_eq!(link_candidate(".md"), None);
        assert_eq!(link_candidate(""), None);
    }

    #[test]
    fn test_parent_path() {
        assert_eq!(parent_path("/a/b"), "/a");
        assert_eq!(parent_path("/a"), "");
        assert_eq!(parent_path("a"), "");
    }

    #[test]
    fn test_no_match() {
        let routes = registry(&["/docs/components/button"]);

        assert_eq!(resolve(&routes, "missing.md", "/docs"), None);
        assert_eq!(resolve(&routes, "", "/docs"), None);
    }

    #[test]
    fn test_partial_segment_is_not_a_match() {
        let routes = registry(&["/docs/components/button-group"]);

        assert_eq!(resolve(&routes, "button.md", ""), None);
    }

    #[test]
    fn test_single_candidate_regardless_of_search_path() {
        let routes = registry(&["/docs/legacy/button", "/docs/guides/forms"]);

        for from in ["", "/docs", "/docs/guides/forms", "/unrelated/deep/path"] {
            assert_eq!(
                resolve(&routes, "button.md", from),
                Some("/docs/legacy/button")
            );
        }
    }

    #[test]
    fn test_deepest_location_preferred() {
        let routes = registry(&["/name", "/a/name", "/a/b/name"]);

        assert_eq!(resolve(&routes, "name.md", "/a/b"), Some("/a/b/name"));
        assert_eq!(resolve(&routes, "name.md", "/a/b/c"), Some("/a/b/name"));
        assert_eq!(resolve(&routes, "name.md", "/a/x"), Some("/a/name"));
    }

    #[test]
    fn test_empty_search_path_prefers_segment_boundary() {
        let routes = registry(&["/docs/forms/button", "/docs/button"]);

        // Both contain "/button"; first in registry order wins.
        assert_eq!(resolve(&routes, "button.md", ""), Some("/docs/forms/button"));
    }

    #[test]
    fn test_closest_ancestor_from_sibling_section() {
        let routes = registry(&["/docs/legacy/button", "/docs/components/button"]);

        assert_eq!(
            resolve(&routes, "components/button.md", "/docs/components/card"),
            Some("/docs/components/button")
        );
    }

    #[test]
    fn test_end_to_end_falls_back_to_registry_order() {
        // Narrowing /docs/guides/forms -> /docs/guides -> /docs -> "" never
        // finds "<path>/button", so registry order decides.
        let components_first = registry(&["/docs/components/button", "/docs/legacy/button"]);
        assert_eq!(
            resolve(&components_first, "components/button.md", "/docs/guides/forms"),
            Some("/docs/components/button")
        );

        let legacy_first = registry(&["/docs/legacy/button", "/docs/components/button"]);
        assert_eq!(
            resolve(&legacy_first, "components/button.md", "/docs/guides/forms"),
            Some("/docs/legacy/button")
        );
    }

    #[test]
    fn test_end_to_end_shared_prefix_wins() {
        let routes = registry(&[
            "/docs/legacy/button",
            "/docs/components/button",
            "/docs/guides/button",
        ]);

        assert_eq!(
            resolve(&routes, "components/button.md", "/docs/guides/forms"),
            Some("/docs/guides/button")
        );
    }

    #[test]
    fn test_trailing_slash_on_search_path() {
        let routes = registry(&["/x/name", "/a/name"]);

        assert_eq!(resolve(&routes, "name", "/a/"), Some("/a/name"));
    }
}
