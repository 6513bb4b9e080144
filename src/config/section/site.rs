//! `[site]` section configuration.
//!
//! Locates the site build output and the directory where compiled deployment
//! artifacts are written.
//!
//! # Example
//!
//! ```toml
//! [site]
//! path = "packages/web"       # Site root (build output lives underneath)
//! framework = "astro"         # Framework adapter: astro | static
//! artifacts = ".stratus"      # Where compiled artifacts are written
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Site location and framework selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    /// Site root directory, relative to the config file.
    pub path: PathBuf,

    /// Framework adapter name. When unset, the adapter is detected from the
    /// build output (a build metadata file selects the astro adapter).
    pub framework: Option<String>,

    /// Directory where compiled artifacts are written.
    pub artifacts: PathBuf,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
            framework: None,
            artifacts: PathBuf::from(".stratus"),
        }
    }
}

impl SiteSection {
    /// Validate site configuration.
    pub fn validate(&self, diag: &mut crate::config::ConfigDiagnostics) {
        if let Some(framework) = &self.framework
            && !matches!(framework.as_str(), "astro" | "static")
        {
            diag.error_with_hint(
                "site.framework",
                format!("unknown framework `{framework}`"),
                "supported values: astro, static",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{DeployConfig, test_parse_config};

    #[test]
    fn test_site_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.site.path, std::path::PathBuf::from("."));
        assert!(config.site.framework.is_none());
        assert_eq!(config.site.artifacts, std::path::PathBuf::from(".stratus"));
    }

    #[test]
    fn test_site_framework_validation() {
        let config = test_parse_config("[site]\nframework = \"nextjs\"");
        assert!(config.validate().is_err());

        let config = test_parse_config("[site]\nframework = \"astro\"");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_site_unknown_field_detected() {
        let (_, ignored) =
            DeployConfig::parse_with_ignored("[site]\nunknown = \"field\"").unwrap();
        assert!(ignored.iter().any(|f| f.contains("unknown")));
    }
}
