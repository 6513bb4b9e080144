//! Routing artifact generation.
//!
//! The flattened route tree is rendered as executable data for the CDN's
//! edge-function runtime: a literal array-of-arrays plus a fixed interpreter
//! routine. Both follow an exact grammar so the artifact stays testable
//! independently of the provisioning glue that embeds it.
//!
//! Serialization grammar, one outer element per entry:
//!
//! ```text
//! [/^prefix/,[...subtree]]      nested matcher
//! [pattern]                     static page (rewrite, HTML suffixing)
//! [pattern,1]                   static endpoint (rewrite, no suffixing)
//! [pattern,2,"target"[,status]] redirect with backreference substitution
//! ```
//!
//! Patterns are emitted verbatim; the manifest already carries them in
//! source-literal form (`/^\/about\/?$/`).

use serde::{Deserialize, Serialize};

use super::flatten::FlatEntry;

/// How a prerendered page path maps to its on-disk file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageResolution {
    /// `/about` resolves to `/about.html`.
    File,
    /// `/about` resolves to `/about/index.html`.
    Directory,
}

/// Render the flattened tree as a literal array-of-arrays.
pub fn serialize_route_tree(entries: &[FlatEntry]) -> String {
    let rendered: Vec<String> = entries.iter().map(serialize_entry).collect();
    format!("[{}]", rendered.join(","))
}

fn serialize_entry(entry: &FlatEntry) -> String {
    match entry {
        FlatEntry::Page { pattern } => format!("[{pattern}]"),
        FlatEntry::Endpoint { pattern } => format!("[{pattern},1]"),
        FlatEntry::Redirect {
            pattern,
            target,
            status,
        } => {
            let target = target.as_deref().unwrap_or_default();
            match status {
                Some(status) => format!("[{pattern},2,\"{target}\",{status}]"),
                None => format!("[{pattern},2,\"{target}\"]"),
            }
        }
        FlatEntry::Subtree { prefix, entries } => {
            format!("[/^{prefix}/,{}]", serialize_route_tree(entries))
        }
    }
}

/// Generate the routing function body injected into the edge request
/// handler.
///
/// The interpreter takes the first non-empty match at the top level,
/// recurses depth-first through nested subtrees, then acts on the matched
/// tuple: pages rewrite extension-less request paths to their static file
/// per `resolution`; redirects substitute `${n}` capture-group
/// backreferences into the target and return a response with the given
/// status (default 308).
pub fn routing_injection(entries: &[FlatEntry], resolution: PageResolution) -> String {
    let tree = serialize_route_tree(entries);
    let rewrite = match resolution {
        PageResolution::File => {
            r#"event.request.uri = event.request.uri === "/" ? "/index.html" : event.request.uri.replace(/\/?$/, ".html");"#
        }
        PageResolution::Directory => {
            r#"event.request.uri = event.request.uri.replace(/\/?$/, "/index.html");"#
        }
    };

    let mut out = String::new();
    out.push_str("\n    var routeData = ");
    out.push_str(&tree);
    out.push_str(";\n");
    out.push_str(
        "    var findFirstMatch = (matches) => Array.isArray(matches[0]) ? findFirstMatch(matches[0]) : matches;\n",
    );
    out.push_str(
        "    var findMatches = (path, routeData) => routeData.map((route) => route[0].test(path) ? Array.isArray(route[1]) ? findMatches(path, route[1]) : route : null).filter(route => route !== null && route.length > 0);\n",
    );
    out.push_str(
        "    var matchedRoute = findFirstMatch(findMatches(event.request.uri, routeData));\n",
    );
    out.push_str("    if (matchedRoute[0]) {\n");
    out.push_str("      if (!matchedRoute[1] && !/^.*\\.[^\\/]+$/.test(event.request.uri)) {\n");
    out.push_str("        ");
    out.push_str(rewrite);
    out.push('\n');
    out.push_str("      } else if (matchedRoute[1] === 2) {\n");
    out.push_str("        var redirectPath = matchedRoute[2];\n");
    out.push_str(
        "        matchedRoute[0].exec(event.request.uri).slice(1).forEach((match, index) => {\n",
    );
    out.push_str("          redirectPath = redirectPath.replace(`\\${${index}}`, match);\n");
    out.push_str("        });\n");
    out.push_str("        return {\n");
    out.push_str("          statusCode: matchedRoute[3] || 308,\n");
    out.push_str("          headers: { location: { value: redirectPath } },\n");
    out.push_str("        };\n");
    out.push_str("      }\n");
    out.push_str("    }");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::flatten::flatten_route_tree;
    use crate::route::manifest::{endpoint, page, redirect};
    use crate::route::tree::build_route_tree;

    fn compile(routes: &[crate::route::manifest::RouteDescriptor]) -> String {
        let tree = build_route_tree(routes, 0);
        serialize_route_tree(&flatten_route_tree(&tree, ""))
    }

    #[test]
    fn test_serialize_page() {
        let routes = vec![page("/^\\/about\\/?$/", true)];
        assert_eq!(compile(&routes), "[[/^\\/about\\/?$/]]");
    }

    #[test]
    fn test_serialize_endpoint() {
        let routes = vec![endpoint("/^\\/feed\\.xml$/", true)];
        assert_eq!(compile(&routes), "[[/^\\/feed\\.xml$/,1]]");
    }

    #[test]
    fn test_serialize_redirect_with_status() {
        let routes = vec![redirect("/^\\/old\\/?$/", "/new", Some(301))];
        assert_eq!(compile(&routes), "[[/^\\/old\\/?$/,2,\"/new\",301]]");
    }

    #[test]
    fn test_serialize_redirect_default_status() {
        let routes = vec![redirect("/^\\/old\\/?$/", "/new", None)];
        assert_eq!(compile(&routes), "[[/^\\/old\\/?$/,2,\"/new\"]]");
    }

    #[test]
    fn test_serialize_subtree_prefix() {
        let routes = vec![
            page("/^\\/docs\\/a\\/?$/", true),
            page("/^\\/docs\\/b\\/?$/", true),
        ];
        let serialized = compile(&routes);
        assert!(serialized.starts_with("[[/^\\/docs/,["));
        assert!(serialized.contains("[/^\\/docs\\/a\\/?$/]"));
        assert!(serialized.contains("[/^\\/docs\\/b\\/?$/]"));
    }

    #[test]
    fn test_injection_file_resolution() {
        let routes = vec![page("/^\\/about\\/?$/", true)];
        let tree = build_route_tree(&routes, 0);
        let flat = flatten_route_tree(&tree, "");
        let injection = routing_injection(&flat, PageResolution::File);

        assert!(injection.contains("var routeData = [[/^\\/about\\/?$/]];"));
        assert!(injection.contains(r#"replace(/\/?$/, ".html")"#));
        assert!(!injection.contains("/index.html\");"));
    }

    #[test]
    fn test_injection_directory_resolution() {
        let routes = vec![page("/^\\/about\\/?$/", true)];
        let tree = build_route_tree(&routes, 0);
        let flat = flatten_route_tree(&tree, "");
        let injection = routing_injection(&flat, PageResolution::Directory);

        assert!(injection.contains(r#"replace(/\/?$/, "/index.html")"#));
    }

    #[test]
    fn test_injection_redirect_defaults_to_308() {
        let routes = vec![redirect("/^\\/old\\/?$/", "/new", None)];
        let tree = build_route_tree(&routes, 0);
        let flat = flatten_route_tree(&tree, "");
        let injection = routing_injection(&flat, PageResolution::File);

        assert!(injection.contains("matchedRoute[3] || 308"));
    }

    #[test]
    fn test_pruned_branch_absent_from_artifact() {
        let routes = vec![
            page("/^\\/about\\/?$/", true),
            endpoint("/^\\/api\\/health$/", false),
        ];
        let serialized = compile(&routes);
        assert!(!serialized.contains("api"));
    }
}
