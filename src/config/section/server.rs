//! `[server]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [server]
//! regions = ["us-east-1", "eu-west-1"]
//! ```

use serde::{Deserialize, Serialize};

/// Regions the server function may be deployed to. Requests are routed to
/// the nearest one, so the list is fixed and validated up front.
pub const SUPPORTED_REGIONS: &[&str] = &[
    "af-south-1",
    "ap-east-1",
    "ap-northeast-1",
    "ap-northeast-2",
    "ap-northeast-3",
    "ap-south-1",
    "ap-south-2",
    "ap-southeast-1",
    "ap-southeast-2",
    "ap-southeast-3",
    "ap-southeast-4",
    "ap-southeast-5",
    "ap-southeast-7",
    "ca-central-1",
    "ca-west-1",
    "cn-north-1",
    "cn-northwest-1",
    "eu-central-1",
    "eu-central-2",
    "eu-north-1",
    "eu-south-1",
    "eu-south-2",
    "eu-west-1",
    "eu-west-2",
    "eu-west-3",
    "il-central-1",
    "me-central-1",
    "me-south-1",
    "mx-central-1",
    "sa-east-1",
    "us-east-1",
    "us-east-2",
    "us-gov-east-1",
    "us-gov-west-1",
    "us-west-1",
    "us-west-2",
];

/// Server function configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Deployment regions. Empty means the provider's default region.
    pub regions: Vec<String>,
}

impl ServerSection {
    /// Validate server configuration.
    ///
    /// # Checks
    /// - Every region must be in the supported region list.
    pub fn validate(&self, diag: &mut crate::config::ConfigDiagnostics) {
        for region in &self.regions {
            if !SUPPORTED_REGIONS.contains(&region.as_str()) {
                diag.error_with_hint(
                    "server.regions",
                    format!("unsupported region `{region}`"),
                    "see the supported region list in the documentation",
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_server_defaults() {
        let config = test_parse_config("");
        assert!(config.server.regions.is_empty());
    }

    #[test]
    fn test_server_valid_regions() {
        let config = test_parse_config("[server]\nregions = [\"us-east-1\", \"eu-west-1\"]");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_server_invalid_region_rejected() {
        let config = test_parse_config("[server]\nregions = [\"mars-north-1\"]");
        let err = config.validate().unwrap_err();
        assert!(format!("{err}").contains("mars-north-1"));
    }
}
