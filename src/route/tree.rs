//! Route tree construction.
//!
//! Testing every route's full pattern against every request at the edge is
//! too slow once a site has hundreds of routes; the edge runtime's compute
//! budget is tiny. Grouping routes into a prefix tree by path segment turns
//! O(routes) matching into O(depth), and pruning drops branches that carry
//! no static-routing decision so they fall through to dynamic handling.

use regex::Regex;
use rustc_hash::FxHashSet;
use std::sync::LazyLock;

use super::manifest::RouteDescriptor;

/// Capture groups collapse to their literal content for segment grouping:
/// `(?:foo)` and `(foo)` both contribute `foo` to the token.
static CAPTURE_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((?:\?:)?(.*?[^\\])\)").expect("capture group regex"));

/// Intermediate tree node. Branches are ordered by first insertion so the
/// compiled matcher preserves the manifest's first-match semantics.
#[derive(Debug, Default)]
pub struct RouteNode {
    pub branches: Vec<(String, RouteNode)>,
    pub nodes: Vec<RouteDescriptor>,
}

impl RouteNode {
    fn branch_mut(&mut self, key: String) -> &mut RouteNode {
        if let Some(index) = self.branches.iter().position(|(k, _)| *k == key) {
            return &mut self.branches[index].1;
        }
        self.branches.push((key, RouteNode::default()));
        &mut self.branches.last_mut().expect("just pushed").1
    }
}

/// Strip capture-group syntax and anchor markers from a pattern.
pub fn clean_pattern(pattern: &str) -> String {
    let without_groups = CAPTURE_GROUP.replace_all(pattern, |caps: &regex::Captures| {
        caps[1].trim().to_string()
    });
    without_groups.replace("/^", "").replace("$/", "")
}

/// Split a cleaned pattern into segments, one per escaped slash. Boundaries
/// sit immediately before each `\/`, so every segment after the first starts
/// with one.
pub fn split_segments(pattern: &str) -> Vec<String> {
    if pattern.is_empty() {
        return vec![String::new()];
    }
    let mut boundaries = vec![0];
    for (index, _) in pattern.match_indices("\\/") {
        if index > 0 {
            boundaries.push(index);
        }
    }
    boundaries.push(pattern.len());
    boundaries
        .windows(2)
        .map(|w| pattern[w[0]..w[1]].to_string())
        .collect()
}

/// Drop exact-pattern duplicates, keeping the first occurrence.
///
/// First-wins is deliberate, documented policy: the manifest is ordered and
/// the first entry for a pattern is the one the build considers canonical.
fn dedupe_routes(routes: &[RouteDescriptor]) -> Vec<RouteDescriptor> {
    let mut seen = FxHashSet::default();
    routes
        .iter()
        .filter(|route| seen.insert(route.pattern.as_str()))
        .cloned()
        .collect()
}

/// Build the route tree for one nesting level.
///
/// Routes group into branches keyed by the segment token at `level`. Each
/// branch is then either pruned (no prerendered page or redirect anywhere in
/// it), kept as a terminal (single route), or recursed into at `level + 1`
/// after deduplication, with the subtree replacing the branch's leaf nodes.
pub fn build_route_tree(routes: &[RouteDescriptor], level: usize) -> RouteNode {
    let mut root = RouteNode::default();
    for route in routes {
        let segments = split_segments(&clean_pattern(&route.pattern));
        let token = segments.get(level).cloned().unwrap_or_default();
        root.branch_mut(token).nodes.push(route.clone());
    }

    let branches = std::mem::take(&mut root.branches);
    root.branches = branches
        .into_iter()
        .filter_map(|(key, branch)| {
            if !branch.nodes.iter().any(RouteDescriptor::is_statically_resolvable) {
                // No static decision anywhere in this branch; requests fall
                // through to default dynamic routing.
                return None;
            }
            if branch.nodes.len() > 1 {
                let deduplicated = dedupe_routes(&branch.nodes);
                return Some((key, build_route_tree(&deduplicated, level + 1)));
            }
            Some((key, branch))
        })
        .collect();

    root
}
