//! Deployment configuration: loading, parsing, validation.
//!
//! Configuration lives in `stratus.toml` next to the site. Every section is
//! optional; a missing file means all defaults, since the framework adapter
//! derives most of the plan from build output.

pub mod error;
pub mod section;

pub use error::{ConfigDiagnostic, ConfigDiagnostics, ConfigError};
pub use section::{
    AssetsSection, CdnSection, FileOptionEntry, GlobList, InvalidationPaths, InvalidationSection,
    PathMode, SUPPORTED_REGIONS, ServerSection, SiteSection,
};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::debug;

/// Top-level deployment configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeployConfig {
    pub site: SiteSection,
    pub assets: AssetsSection,
    pub invalidation: InvalidationSection,
    pub cdn: CdnSection,
    pub server: ServerSection,

    /// Path the config was loaded from (not part of the file).
    #[serde(skip)]
    pub config_path: PathBuf,
}

impl DeployConfig {
    /// Load configuration from a TOML file.
    ///
    /// A missing file yields defaults; an unreadable or malformed file is an
    /// error. Unknown keys are logged so typos don't silently disappear.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("config"; "no config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let (mut config, ignored) = Self::parse_with_ignored(&content)?;
        for field in &ignored {
            crate::log!("config"; "ignoring unknown field `{field}`");
        }
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    /// Parse TOML content, collecting unknown field paths.
    pub fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let deserializer = toml::de::Deserializer::new(content);
        let mut ignored = Vec::new();
        let config = serde_ignored::deserialize(deserializer, |path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Run all section validations; collects every diagnostic before failing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();
        self.site.validate(&mut diag);
        self.assets.validate(&mut diag);
        self.invalidation.validate(&mut diag);
        self.cdn.validate(&mut diag);
        self.server.validate(&mut diag);
        diag.into_result()
    }

    /// Site root directory, resolved relative to the config file location.
    pub fn site_root(&self) -> PathBuf {
        match self.config_path.parent() {
            Some(parent) if !self.config_path.as_os_str().is_empty() => {
                parent.join(&self.site.path)
            }
            _ => self.site.path.clone(),
        }
    }

    /// Artifact output directory, resolved like [`Self::site_root`].
    pub fn artifacts_dir(&self) -> PathBuf {
        match self.config_path.parent() {
            Some(parent) if !self.config_path.as_os_str().is_empty() => {
                parent.join(&self.site.artifacts)
            }
            _ => self.site.artifacts.clone(),
        }
    }
}

/// Parse a config snippet for tests; panics on parse errors.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> DeployConfig {
    let (config, _) = DeployConfig::parse_with_ignored(content).unwrap();
    config
}
