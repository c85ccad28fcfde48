//! Flat route registry derived from a [`RouteTree`].
//!
//! The registry is the runtime view of the documentation tree: an immutable,
//! insertion-ordered `path -> Route` map. Insertion order matters because
//! [`ClosestRouteResolver`](crate::ClosestRouteResolver) breaks ties by it.

use std::collections::HashMap;

use serde::Serialize;

use crate::route_tree::{RouteItem, RouteTree};
use crate::text::slugify;

/// A navigable route.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Route {
    /// Route path (e.g., "/documentation/guides/getting-started").
    pub path: String,
    /// Display name.
    pub name: String,
    /// Source file location, for document routes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_location: Option<String>,
    /// Content binding identifier, for document routes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_ref: Option<String>,
}

impl Route {
    /// Create a route without document information.
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            file_location: None,
            content_ref: None,
        }
    }

    /// True if `name` is one of the path's segments.
    pub(crate) fn has_segment(&self, name: &str) -> bool {
        self.path.split('/').any(|segment| segment == name)
    }
}

/// Immutable, insertion-ordered route lookup.
#[derive(Clone, Debug, Default)]
pub struct RouteRegistry {
    routes: Vec<Route>,
    path_index: HashMap<String, usize>,
}

impl RouteRegistry {
    /// Build a registry from routes in the given order.
    ///
    /// When two routes share a path, the first one wins.
    pub fn from_routes(routes: impl IntoIterator<Item = Route>) -> Self {
        let mut registry = Self::default();
        for route in routes {
            if registry.path_index.contains_key(&route.path) {
                tracing::debug!(path = %route.path, "Duplicate route path, keeping first");
                continue;
            }
            registry
                .path_index
                .insert(route.path.clone(), registry.routes.len());
            registry.routes.push(route);
        }
        registry
    }

    /// Flatten a route tree depth-first.
    ///
    /// The root comes first, then each node followed by its children. Node
    /// paths extend the documentation path with raw segments; document paths
    /// extend their parent path with the slug of the document name.
    #[must_use]
    pub fn from_tree(tree: &RouteTree) -> Self {
        let mut routes = vec![Route::new(&tree.path, &tree.name)];
        // Explicit stack of (parent path, remaining children in reverse).
        let mut stack: Vec<(String, Vec<&RouteItem>)> =
            vec![(tree.path.clone(), tree.data.iter().rev().collect())];

        while let Some((parent, mut pending)) = stack.pop() {
            let Some(item) = pending.pop() else {
                continue;
            };
            match item {
                RouteItem::Leaf(leaf) => {
                    routes.push(Route {
                        path: format!("{parent}/{}", slugify(&leaf.name)),
                        name: leaf.name.clone(),
                        file_location: Some(leaf.file_location.clone()),
                        content_ref: Some(leaf.content_ref.clone()),
                    });
                    stack.push((parent, pending));
                }
                RouteItem::Node(node) => {
                    let path = format!("{parent}/{}", node.segment);
                    routes.push(Route::new(&path, &node.name));
                    stack.push((parent, pending));
                    stack.push((path, node.children.iter().rev().collect()));
                }
            }
        }

        Self::from_routes(routes)
    }

    /// Look up a route by exact path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Route> {
        self.path_index.get(path).map(|&i| &self.routes[i])
    }

    /// Find the document route for a source file location.
    #[must_use]
    pub fn by_file_location(&self, file_location: &str) -> Option<&Route> {
        self.routes
            .iter()
            .find(|r| r.file_location.as_deref() == Some(file_location))
    }

    /// Routes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    /// Number of routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// True if the registry has no routes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::entry::{DocSet, test_entry};
    use crate::route_tree::RouteTreeBuilder;

    #[test]
    fn test_from_tree_depth_first_order() {
        let docs = DocSet::new(
            vec![
                test_entry(&["guides"], "intro.md", "Getting Started"),
                test_entry(&["guides", "forms"], "button.md", "Button"),
                test_entry(&[], "faq.md", "FAQ"),
            ],
            BTreeMap::new(),
        );
        let tree = RouteTreeBuilder::new().build(&docs).unwrap();

        let registry = RouteRegistry::from_tree(&tree);

        let paths: Vec<_> = registry.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "/documentation",
                "/documentation/faq",
                "/documentation/guides",
                "/documentation/guides/forms",
                "/documentation/guides/forms/button",
                "/documentation/guides/getting-started",
            ]
        );

        let intro = registry.get("/documentation/guides/getting-started").unwrap();
        assert_eq!(intro.name, "Getting Started");
        assert_eq!(intro.content_ref.as_deref(), Some("guidesGettingStarted"));
        assert_eq!(
            registry
                .by_file_location("/src/docs/guides/intro.md")
                .map(|r| r.path.as_str()),
            Some("/documentation/guides/getting-started")
        );
    }

    #[test]
    fn test_duplicate_paths_keep_first() {
        let registry = RouteRegistry::from_routes([
            Route::new("/docs/a", "First"),
            Route::new("/docs/a", "Second"),
        ]);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("/docs/a").unwrap().name, "First");
    }

    #[test]
    fn test_has_segment() {
        let route = Route::new("/docs/components/button", "Button");

        assert!(route.has_segment("button"));
        assert!(route.has_segment("components"));
        assert!(!route.has_segment("butt"));
    }

    #[test]
    fn test_empty_registry() {
        let registry = RouteRegistry::default();

        assert!(registry.is_empty());
        assert!(registry.get("/").is_none());
    }
}
