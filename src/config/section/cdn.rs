//! `[cdn]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [cdn]
//! enabled = true
//! domain = "my-app.com"
//! ```

use serde::{Deserialize, Serialize};

/// CDN configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CdnSection {
    /// Serve the site through a CDN distribution. Disable when the site is
    /// routed through an outer router component instead.
    pub enabled: bool,

    /// Custom domain for the distribution.
    pub domain: Option<String>,
}

impl Default for CdnSection {
    fn default() -> Self {
        Self {
            enabled: true,
            domain: None,
        }
    }
}

impl CdnSection {
    /// Validate CDN configuration.
    ///
    /// # Checks
    /// - A custom domain requires the CDN to be enabled; with the CDN
    ///   disabled the domain belongs on the outer router instead.
    pub fn validate(&self, diag: &mut crate::config::ConfigDiagnostics) {
        if !self.enabled && self.domain.is_some() {
            diag.error_with_hint(
                "cdn.domain",
                "custom domain is set but the CDN is disabled",
                "enable the CDN, or configure the domain on the router serving this site",
            );
        }
    }
}
