//! Route tree construction from scanned documents.
//!
//! Documents are folded into a tree of [`RouteNode`]s (directories) and
//! [`RouteLeaf`]s (documents) under a fixed documentation root. Nodes are
//! created lazily, so directories without markdown descendants never appear.
//!
//! The tree serializes two ways:
//! - [`RouteTree::to_module`] emits the generated route module (imports plus a
//!   default-exported structural literal)
//! - serde (JSON) for the route manifest read back at render time

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::entry::{DocEntry, DocSet};
use crate::error::BuildError;
use crate::literal::{Literal, write_quoted};
use crate::text::humanize;

/// Display name of the documentation root.
pub const DOCUMENTATION_NAME: &str = "Documentation";

/// Public path of the documentation root.
pub const DOCUMENTATION_PATH: &str = "/documentation";

/// Prefix of node `full_path` values.
pub const ROUTE_PREFIX: &str = "/docs";

/// A directory in the route tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteNode {
    /// Display title (override or humanized segment).
    pub name: String,
    /// Raw path segment.
    #[serde(rename = "path")]
    pub segment: String,
    /// Accumulated path from the route prefix (e.g., "/docs/guides").
    #[serde(rename = "fullPath")]
    pub full_path: String,
    /// Child directories and documents, in source path order.
    pub children: Vec<RouteItem>,
}

/// A document in the route tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteLeaf {
    /// Source file location for edit links (e.g., "/src/docs/guides/intro.md").
    #[serde(rename = "fileLocation")]
    pub file_location: String,
    /// Humanized document title.
    pub name: String,
    /// Identifier of the content binding for this document.
    #[serde(rename = "markdown")]
    pub content_ref: String,
}

/// Child of a route node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RouteItem {
    /// Directory.
    Node(RouteNode),
    /// Document.
    Leaf(RouteLeaf),
}

impl RouteItem {
    fn as_node(&self) -> Option<&RouteNode> {
        match self {
            Self::Node(node) => Some(node),
            Self::Leaf(_) => None,
        }
    }

    fn to_literal(&self) -> Literal {
        match self {
            Self::Node(node) => Literal::Object(vec![
                ("name", Literal::str(&node.name)),
                ("path", Literal::str(&node.segment)),
                (
                    "children",
                    Literal::Array(node.children.iter().map(Self::to_literal).collect()),
                ),
            ]),
            Self::Leaf(leaf) => Literal::Object(vec![
                ("fileLocation", Literal::str(&leaf.file_location)),
                ("name", Literal::str(&leaf.name)),
                ("markdown", Literal::Ident(leaf.content_ref.clone())),
            ]),
        }
    }
}

/// Binding of a content identifier to the module that provides it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBinding {
    /// Identifier used as `content_ref` by a leaf.
    pub identifier: String,
    /// Import specifier of the markdown source.
    pub module_path: String,
}

/// The documentation route tree and its content bindings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTree {
    /// Root display name.
    pub name: String,
    /// Root public path.
    pub path: String,
    /// Top-level nodes and leaves.
    pub data: Vec<RouteItem>,
    /// Content bindings, one per document, in source path order.
    pub bindings: Vec<ContentBinding>,
}

impl RouteTree {
    /// Structural literal of the tree root (bindings excluded).
    #[must_use]
    pub fn to_literal(&self) -> Literal {
        Literal::Object(vec![
            ("name", Literal::str(&self.name)),
            ("path", Literal::str(&self.path)),
            (
                "data",
                Literal::Array(self.data.iter().map(RouteItem::to_literal).collect()),
            ),
        ])
    }

    /// Generated route module source.
    ///
    /// One `import` line per binding, a blank line, then the default export.
    #[must_use]
    pub fn to_module(&self) -> String {
        let mut out = String::new();
        for binding in &self.bindings {
            out.push_str("import ");
            out.push_str(&binding.identifier);
            out.push_str(" from ");
            write_quoted(&mut out, &binding.module_path, '\'');
            out.push('\n');
        }
        out.push_str("\nexport default [");
        out.push_str(&self.to_literal().to_source());
        out.push_str("];\n");
        out
    }

    /// JSON manifest of the tree.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Manifest`] if serialization fails.
    pub fn to_manifest(&self) -> Result<String, BuildError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a tree from its JSON manifest.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Manifest`] if the manifest is malformed.
    pub fn from_manifest(json: &str) -> Result<Self, BuildError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Folds a [`DocSet`] into a [`RouteTree`].
#[derive(Debug, Default)]
pub struct RouteTreeBuilder;

impl RouteTreeBuilder {
    /// Create a builder.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Build the route tree.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::IdentifierCollision`] if two documents derive the
    /// same identifier.
    pub fn build(&self, docs: &DocSet) -> Result<RouteTree, BuildError> {
        let mut data = Vec::new();
        let mut bindings = Vec::with_capacity(docs.len());
        let mut seen: HashMap<&str, &DocEntry> = HashMap::with_capacity(docs.len());

        for entry in docs.entries() {
            if let Some(first) = seen.insert(&entry.identifier, entry) {
                return Err(BuildError::IdentifierCollision {
                    identifier: entry.identifier.clone(),
                    first: first.source_path.clone(),
                    second: entry.source_path.clone(),
                });
            }
            bindings.push(ContentBinding {
                identifier: entry.identifier.clone(),
                module_path: entry.module_path.clone(),
            });

            let mut level = &mut data;
            let mut full_path = ROUTE_PREFIX.to_owned();
            for (depth, segment) in entry.relative_path.iter().enumerate() {
                full_path.push('/');
                full_path.push_str(segment);
                let segments = &entry.relative_path[..=depth];
                let node = child_node(level, &full_path, || RouteNode {
                    name: docs
                        .dir_title(segments)
                        .map_or_else(|| humanize(segment), ToOwned::to_owned),
                    segment: segment.clone(),
                    full_path: full_path.clone(),
                    children: Vec::new(),
                });
                level = &mut node.children;
            }

            level.push(RouteItem::Leaf(RouteLeaf {
                file_location: format!("/{}", entry.source_path),
                name: humanize(&entry.title),
                content_ref: entry.identifier.clone(),
            }));
        }

        tracing::debug!(
            document_count = bindings.len(),
            top_level = data.len(),
            "Route tree built"
        );

        Ok(RouteTree {
            name: DOCUMENTATION_NAME.to_owned(),
            path: DOCUMENTATION_PATH.to_owned(),
            data,
            bindings,
        })
    }
}

/// Find the child node with `full_path` in `level`, creating it if missing.
fn child_node<'a>(
    level: &'a mut Vec<RouteItem>,
    full_path: &str,
    create: impl FnOnce() -> RouteNode,
) -> &'a mut RouteNode {
    let position = level
        .iter()
        .position(|item| item.as_node().is_some_and(|n| n.full_path == full_path));
    let index = position.unwrap_or_else(|| {
        level.push(RouteItem::Node(create()));
        level.len() - 1
    });
    match &mut level[index] {
        RouteItem::Node(node) => node,
        RouteItem::Leaf(_) => unreachable!("index always points at a node"),
    }
}
