//! `[invalidation]` section configuration.
//!
//! CDN invalidation is rate-limited and billed per path beyond a free tier,
//! so the path set is configurable and the whole step can be turned off.
//!
//! # Example
//!
//! ```toml
//! [invalidation]
//! enabled = true
//! wait = false
//! paths = "all"               # "all" | "versioned" | ["/index.html", "/products/*"]
//! ```

use serde::{Deserialize, Serialize};

/// Invalidation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvalidationSection {
    /// Run invalidation at all. When false no plan is produced.
    pub enabled: bool,

    /// Wait for the CDN to finish invalidating before the deploy completes.
    pub wait: bool,

    /// Which CDN paths to mark stale.
    pub paths: InvalidationPaths,
}

impl Default for InvalidationSection {
    fn default() -> Self {
        Self {
            enabled: true,
            wait: false,
            paths: InvalidationPaths::Mode(PathMode::All),
        }
    }
}

/// Invalidation path selection: a named mode or an explicit glob list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InvalidationPaths {
    Mode(PathMode),
    List(Vec<String>),
}

/// Named invalidation modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathMode {
    /// Single wildcard path covering the whole distribution.
    All,
    /// One wildcard per versioned subdirectory. Cheapest correct set when
    /// only versioned assets changed.
    Versioned,
}

impl InvalidationSection {
    /// Validate invalidation configuration.
    pub fn validate(&self, diag: &mut crate::config::ConfigDiagnostics) {
        if let InvalidationPaths::List(paths) = &self.paths {
            for path in paths {
                if !path.starts_with('/') {
                    diag.error_with_hint(
                        "invalidation.paths",
                        format!("path `{path}` must start with `/`"),
                        "CDN invalidation paths are absolute, e.g. \"/index.html\"",
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_invalidation_defaults() {
        let config = test_parse_config("");
        assert!(config.invalidation.enabled);
        assert!(!config.invalidation.wait);
        assert_eq!(
            config.invalidation.paths,
            InvalidationPaths::Mode(PathMode::All)
        );
    }

    #[test]
    fn test_invalidation_versioned_mode() {
        let config = test_parse_config("[invalidation]\npaths = \"versioned\"");
        assert_eq!(
            config.invalidation.paths,
            InvalidationPaths::Mode(PathMode::Versioned)
        );
    }

    #[test]
    fn test_invalidation_explicit_paths() {
        let config =
            test_parse_config("[invalidation]\npaths = [\"/index.html\", \"/products/*\"]");
        assert_eq!(
            config.invalidation.paths,
            InvalidationPaths::List(vec![
                "/index.html".to_string(),
                "/products/*".to_string()
            ])
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalidation_relative_path_rejected() {
        let config = test_parse_config("[invalidation]\npaths = [\"index.html\"]");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalidation_disabled() {
        let config = test_parse_config("[invalidation]\nenabled = false");
        assert!(!config.invalidation.enabled);
    }
}
