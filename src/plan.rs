//! Deployment plan: the single surface framework adapters produce and the
//! core components consume.
//!
//! A `Plan` describes what a deployment needs without any framework-specific
//! metadata: which directories to copy into the bucket, whether there is a
//! server function, which error pages the CDN should serve, and the routing
//! code injected into the edge function. The route compiler and the asset
//! pipeline only ever see this structure.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, DeployConfig};

/// One asset-copy operation: a build output subdirectory uploaded under a
/// destination prefix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopyEntry {
    /// Source directory, relative to the build output root.
    pub from: String,
    /// Destination key prefix. Normalized to no leading/trailing slash.
    pub to: String,
    /// Whether this entry participates in invalidation fingerprinting.
    pub cached: bool,
    /// Subdirectory whose filenames change with content, allowing immutable
    /// cache headers.
    pub versioned_sub_dir: Option<String>,
}

/// ISR cache copy step. Uploaded like an asset entry, but never versioned
/// and never fingerprinted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsrCacheEntry {
    pub from: String,
    pub to: String,
}

/// Server function specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSpec {
    /// Handler entry point, relative to the build output root.
    pub handler: String,
    /// Whether the function streams its response.
    pub streaming: bool,
}

/// CDN error-response override: map an origin error code to a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error_code: u16,
    pub response_page_path: String,
    pub response_code: u16,
}

/// Everything the provisioning engine needs to deploy one site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Base path the site is served under (e.g. `/docs`). Only valid with
    /// the CDN disabled; an outer router strips it before origin routing.
    pub base: Option<String>,
    pub server: Option<ServerSpec>,
    pub assets: Vec<CopyEntry>,
    pub isr_cache: Option<IsrCacheEntry>,
    pub error_responses: Vec<ErrorResponse>,
    /// Custom 404 page path, when the framework provides one.
    pub custom_404: Option<String>,
    /// Stable build identifier supplied by the build step. Used verbatim as
    /// the invalidation fingerprint when present.
    pub build_id: Option<String>,
    /// Edge routing function body produced by the route compiler.
    pub routing_injection: Option<String>,
}

/// Validate a plan against the deployment configuration and normalize its
/// path fields.
///
/// Structural conflicts are configuration errors and fail the deployment
/// step outright; nothing here is retried.
pub fn validate_plan(mut plan: Plan, config: &DeployConfig) -> Result<Plan, ConfigError> {
    if plan.base.is_some() && config.cdn.enabled {
        return Err(ConfigError::Validation(
            "a base path is configured but the CDN is enabled; set `cdn.enabled = false` and \
             route the site through a router component"
                .to_string(),
        ));
    }
    if !config.cdn.enabled && config.cdn.domain.is_some() {
        return Err(ConfigError::Validation(
            "a custom domain cannot be configured when the CDN is disabled; configure the \
             domain on the router serving this site instead"
                .to_string(),
        ));
    }

    if let Some(base) = plan.base.take() {
        let mut base = if base.starts_with('/') {
            base
        } else {
            format!("/{base}")
        };
        while base.len() > 1 && base.ends_with('/') {
            base.pop();
        }
        plan.base = Some(base);
    }

    // A leading slash on `to` would create a literal `/` folder in the bucket
    for copy in &mut plan.assets {
        copy.to = copy.to.trim_matches('/').to_string();
    }
    if let Some(isr) = &mut plan.isr_cache {
        isr.to = isr.to.trim_matches('/').to_string();
    }

    Ok(plan)
}
