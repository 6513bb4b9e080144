//! Route tree flattening.
//!
//! Converts the intermediate tree into the compact shape the edge
//! interpreter walks: terminals for single-route branches, and
//! `[prefix, subtree]` pairs for nested branches. Prefixes compound as the
//! tree nests, so the interpreter tests one incremental pattern per level
//! and early-exits instead of re-testing the full path at every node.

use super::manifest::{RouteDescriptor, RouteKind};
use super::tree::RouteNode;

/// One entry in the flattened matcher.
#[derive(Debug, Clone, PartialEq)]
pub enum FlatEntry {
    /// Static page: rewrite the request to its on-disk file.
    Page { pattern: String },
    /// Static endpoint: rewrite without HTML suffixing.
    Endpoint { pattern: String },
    /// HTTP redirect with backreference substitution into the target.
    Redirect {
        pattern: String,
        target: Option<String>,
        status: Option<u16>,
    },
    /// Nested matcher guarded by an accumulated prefix pattern.
    Subtree {
        prefix: String,
        entries: Vec<FlatEntry>,
    },
}

/// Flatten a route tree, compounding `parent_key` into nested prefixes.
pub fn flatten_route_tree(tree: &RouteNode, parent_key: &str) -> Vec<FlatEntry> {
    let mut flat = Vec::new();
    for (key, branch) in &tree.branches {
        if branch.nodes.len() == 1 {
            flat.push(terminal(&branch.nodes[0]));
        } else {
            let prefix = format!("{parent_key}{key}");
            flat.push(FlatEntry::Subtree {
                entries: flatten_route_tree(branch, &prefix),
                prefix,
            });
        }
    }
    flat
}

fn terminal(node: &RouteDescriptor) -> FlatEntry {
    match node.kind {
        RouteKind::Page => FlatEntry::Page {
            pattern: node.pattern.clone(),
        },
        RouteKind::Endpoint => FlatEntry::Endpoint {
            pattern: node.pattern.clone(),
        },
        RouteKind::Redirect => FlatEntry::Redirect {
            pattern: node.pattern.clone(),
            target: node.redirect_path.clone(),
            status: node.redirect_status,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::manifest::{page, redirect};
    use crate::route::tree::build_route_tree;

    #[test]
    fn test_flatten_terminals() {
        let routes = vec![
            page("/^\\/about\\/?$/", true),
            redirect("/^\\/old\\/?$/", "/new", Some(301)),
        ];
        let tree = build_route_tree(&routes, 0);
        let flat = flatten_route_tree(&tree, "");

        assert_eq!(
            flat,
            vec![
                FlatEntry::Page {
                    pattern: "/^\\/about\\/?$/".to_string()
                },
                FlatEntry::Redirect {
                    pattern: "/^\\/old\\/?$/".to_string(),
                    target: Some("/new".to_string()),
                    status: Some(301),
                },
            ]
        );
    }

    #[test]
    fn test_flatten_nested_prefix_compounds() {
        let routes = vec![
            page("/^\\/docs\\/intro\\/?$/", true),
            page("/^\\/docs\\/guide\\/setup\\/?$/", true),
            page("/^\\/docs\\/guide\\/usage\\/?$/", true),
        ];
        let tree = build_route_tree(&routes, 0);
        let flat = flatten_route_tree(&tree, "");

        // One top-level subtree for \/docs
        assert_eq!(flat.len(), 1);
        let FlatEntry::Subtree { prefix, entries } = &flat[0] else {
            panic!("expected subtree, got {flat:?}");
        };
        assert_eq!(prefix, "\\/docs");
        assert_eq!(entries.len(), 2);

        // The guide branch nests again, with the prefix compounded
        let FlatEntry::Subtree { prefix, entries } = &entries[1] else {
            panic!("expected nested subtree, got {entries:?}");
        };
        assert_eq!(prefix, "\\/docs\\/guide");
        assert_eq!(entries.len(), 2);
    }
}
