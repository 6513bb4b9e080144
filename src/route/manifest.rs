//! Route manifest: the flat list of route descriptors a site build emits.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Route behavior kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    /// HTML page, possibly prerendered to a static file.
    Page,
    /// Non-HTML handler (API route, asset endpoint).
    Endpoint,
    /// HTTP redirect to another path.
    Redirect,
}

/// One URL-pattern-to-behavior mapping produced by the site build.
///
/// `pattern` is an anchored regular expression in source-literal form
/// (`/^\/about\/?$/`) with zero or more capture groups. The compiler trusts
/// the upstream router's syntax and only performs the transformations needed
/// for tree construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDescriptor {
    pub pattern: String,
    #[serde(rename = "type")]
    pub kind: RouteKind,
    /// The plain route path (`/404`), used for error-page detection.
    #[serde(default)]
    pub route: Option<String>,
    /// Resolved to a static file at build time.
    #[serde(default)]
    pub prerender: bool,
    /// Redirect target, with `${n}` backreference placeholders.
    #[serde(default)]
    pub redirect_path: Option<String>,
    #[serde(default)]
    pub redirect_status: Option<u16>,
}

impl RouteDescriptor {
    /// Whether this route contributes static-routing information. Branches
    /// where no descendant satisfies this are pruned from the matcher.
    pub fn is_statically_resolvable(&self) -> bool {
        self.prerender || self.kind == RouteKind::Redirect
    }
}

/// Route manifest loading errors.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error(
        "could not find route manifest at `{0}`; run the site build first, or update the \
         build adapter to a version that emits one"
    )]
    Missing(std::path::PathBuf),

    #[error("failed to read route manifest at `{0}`")]
    Io(std::path::PathBuf, #[source] std::io::Error),

    #[error("failed to parse route manifest at `{0}`")]
    Parse(std::path::PathBuf, #[source] serde_json::Error),
}

/// Load a route manifest (a JSON array of route descriptors).
///
/// A missing file is a hard error naming the expected path: it means the
/// upstream build step did not run or used an incompatible adapter.
pub fn load_route_manifest(path: &Path) -> Result<Vec<RouteDescriptor>, ManifestError> {
    if !path.exists() {
        return Err(ManifestError::Missing(path.to_path_buf()));
    }
    let content =
        std::fs::read_to_string(path).map_err(|e| ManifestError::Io(path.to_path_buf(), e))?;
    serde_json::from_str(&content).map_err(|e| ManifestError::Parse(path.to_path_buf(), e))
}

#[cfg(test)]
pub fn page(pattern: &str, prerender: bool) -> RouteDescriptor {
    RouteDescriptor {
        pattern: pattern.to_string(),
        kind: RouteKind::Page,
        route: None,
        prerender,
        redirect_path: None,
        redirect_status: None,
    }
}

#[cfg(test)]
pub fn endpoint(pattern: &str, prerender: bool) -> RouteDescriptor {
    RouteDescriptor {
        pattern: pattern.to_string(),
        kind: RouteKind::Endpoint,
        route: None,
        prerender,
        redirect_path: None,
        redirect_status: None,
    }
}

#[cfg(test)]
pub fn redirect(pattern: &str, target: &str, status: Option<u16>) -> RouteDescriptor {
    RouteDescriptor {
        pattern: pattern.to_string(),
        kind: RouteKind::Redirect,
        route: None,
        prerender: false,
        redirect_path: Some(target.to_string()),
        redirect_status: status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_manifest() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("routes.json");
        fs::write(
            &path,
            r#"[
                {"pattern": "/^\\/about\\/?$/", "type": "page", "prerender": true},
                {"pattern": "/^\\/api\\/health$/", "type": "endpoint"},
                {"pattern": "/^\\/old\\/?$/", "type": "redirect",
                 "redirectPath": "/new", "redirectStatus": 301}
            ]"#,
        )
        .unwrap();

        let routes = load_route_manifest(&path).unwrap();
        assert_eq!(routes.len(), 3);
        assert_eq!(routes[0].kind, RouteKind::Page);
        assert!(routes[0].prerender);
        assert!(!routes[1].prerender);
        assert_eq!(routes[2].redirect_path.as_deref(), Some("/new"));
        assert_eq!(routes[2].redirect_status, Some(301));
    }

    #[test]
    fn test_missing_manifest_names_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("routes.json");
        let err = load_route_manifest(&path).unwrap_err();
        assert!(format!("{err}").contains(&path.display().to_string()));
    }

    #[test]
    fn test_statically_resolvable() {
        assert!(page("/^\\/a$/", true).is_statically_resolvable());
        assert!(!page("/^\\/a$/", false).is_statically_resolvable());
        assert!(redirect("/^\\/a$/", "/b", None).is_statically_resolvable());
        assert!(!endpoint("/^\\/a$/", false).is_statically_resolvable());
    }
}
