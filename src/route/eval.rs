//! Matcher evaluation: a Rust mirror of the edge interpreter.
//!
//! Runs the same first-match/depth-first walk the generated interpreter
//! performs, against a request path, without an edge runtime. Backs the
//! `routes --request` simulation and the compiler's behavior tests.

use regex::Regex;

use super::codegen::PageResolution;
use super::flatten::FlatEntry;

/// What the edge function would do with a request path.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteAction {
    /// Rewrite the request path to a static file.
    Rewrite(String),
    /// Return an HTTP redirect.
    Redirect { location: String, status: u16 },
    /// Matched a static endpoint: serve the path as-is from storage.
    Passthrough,
}

/// A flattened route tree with every pattern compiled, ready to evaluate
/// any number of request paths.
pub struct RouteMatcher {
    entries: Vec<CompiledEntry>,
}

/// [`FlatEntry`] with its pattern compiled. Entries whose pattern does not
/// compile are dropped, mirroring the interpreter's behavior when a
/// malformed literal never matches.
enum CompiledEntry {
    Page {
        pattern: Regex,
    },
    Endpoint {
        pattern: Regex,
    },
    Redirect {
        pattern: Regex,
        target: String,
        status: Option<u16>,
    },
    Subtree {
        prefix: Regex,
        entries: Vec<CompiledEntry>,
    },
}

impl RouteMatcher {
    /// Compile each entry's pattern once, up front.
    pub fn new(entries: &[FlatEntry]) -> Self {
        Self {
            entries: compile_entries(entries),
        }
    }

    /// Evaluate a request path against the matcher.
    ///
    /// Returns `None` when nothing matches; the request falls through to
    /// default dynamic routing.
    pub fn evaluate(&self, path: &str, resolution: PageResolution) -> Option<RouteAction> {
        match first_match(path, &self.entries)? {
            CompiledEntry::Page { .. } => {
                if has_file_extension(path) {
                    return Some(RouteAction::Passthrough);
                }
                Some(RouteAction::Rewrite(rewrite_page_path(path, resolution)))
            }
            CompiledEntry::Endpoint { .. } => Some(RouteAction::Passthrough),
            CompiledEntry::Redirect {
                pattern,
                target,
                status,
            } => Some(RouteAction::Redirect {
                location: substitute_backreferences(pattern, target, path),
                status: status.unwrap_or(308),
            }),
            CompiledEntry::Subtree { .. } => unreachable!("first_match only returns terminals"),
        }
    }
}

fn compile_entries(entries: &[FlatEntry]) -> Vec<CompiledEntry> {
    entries.iter().filter_map(compile_entry).collect()
}

fn compile_entry(entry: &FlatEntry) -> Option<CompiledEntry> {
    Some(match entry {
        FlatEntry::Page { pattern } => CompiledEntry::Page {
            pattern: compile_literal(pattern)?,
        },
        FlatEntry::Endpoint { pattern } => CompiledEntry::Endpoint {
            pattern: compile_literal(pattern)?,
        },
        FlatEntry::Redirect {
            pattern,
            target,
            status,
        } => CompiledEntry::Redirect {
            pattern: compile_literal(pattern)?,
            target: target.clone().unwrap_or_default(),
            status: *status,
        },
        FlatEntry::Subtree { prefix, entries } => CompiledEntry::Subtree {
            prefix: compile_prefix(prefix)?,
            entries: compile_entries(entries),
        },
    })
}

/// Depth-first walk taking the first non-empty match, as the interpreter's
/// `findFirstMatch(findMatches(...))` does.
fn first_match<'a>(path: &str, entries: &'a [CompiledEntry]) -> Option<&'a CompiledEntry> {
    for entry in entries {
        let pattern = match entry {
            CompiledEntry::Page { pattern }
            | CompiledEntry::Endpoint { pattern }
            | CompiledEntry::Redirect { pattern, .. } => pattern,
            CompiledEntry::Subtree { prefix, .. } => prefix,
        };
        if !pattern.is_match(path) {
            continue;
        }
        match entry {
            CompiledEntry::Subtree { entries, .. } => {
                // An empty nested result falls through to the next sibling
                if let Some(matched) = first_match(path, entries) {
                    return Some(matched);
                }
            }
            terminal => return Some(terminal),
        }
    }
    None
}

/// Compile a source-literal pattern (`/^...$/`) into a Regex.
fn compile_literal(pattern: &str) -> Option<Regex> {
    let body = pattern.strip_prefix('/')?.strip_suffix('/')?;
    Regex::new(body).ok()
}

/// Compile an accumulated subtree prefix into an anchored Regex.
fn compile_prefix(prefix: &str) -> Option<Regex> {
    Regex::new(&format!("^{prefix}")).ok()
}

/// The interpreter skips rewriting when the path already names a file.
fn has_file_extension(path: &str) -> bool {
    static EXTENSION: std::sync::LazyLock<Regex> =
        std::sync::LazyLock::new(|| Regex::new(r"^.*\.[^/]+$").expect("extension regex"));
    EXTENSION.is_match(path)
}

fn rewrite_page_path(path: &str, resolution: PageResolution) -> String {
    let trimmed = path.strip_suffix('/').unwrap_or(path);
    match resolution {
        PageResolution::File => {
            if path == "/" {
                "/index.html".to_string()
            } else {
                format!("{trimmed}.html")
            }
        }
        PageResolution::Directory => format!("{trimmed}/index.html"),
    }
}

/// Substitute `${n}` backreferences (numbered from the first capture group)
/// from the pattern's match on `path` into the redirect target.
fn substitute_backreferences(pattern: &Regex, target: &str, path: &str) -> String {
    let Some(captures) = pattern.captures(path) else {
        return target.to_string();
    };
    let mut location = target.to_string();
    for (index, group) in captures.iter().skip(1).enumerate() {
        let placeholder = format!("${{{index}}}");
        let value = group.map(|m| m.as_str()).unwrap_or_default();
        location = location.replacen(&placeholder, value, 1);
    }
    location
}
