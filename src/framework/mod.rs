//! Framework adapters.
//!
//! Each supported site framework gets one adapter that reads its build
//! output and produces a [`Plan`]. The rest of the tool never sees
//! framework-specific metadata; the plan is the whole contract.

pub mod astro;
pub mod static_site;

pub use astro::Astro;
pub use static_site::StaticSite;

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::DeployConfig;
use crate::debug;
use crate::plan::Plan;

/// A framework adapter: build output in, deployment plan out.
pub trait Framework {
    fn name(&self) -> &'static str;

    /// Derive the deployment plan from the build output directory.
    fn build_plan(&self, output_path: &Path) -> Result<Plan, FrameworkError>;
}

/// Adapter errors. All fatal; a plan is produced whole or not at all.
#[derive(Debug, Error)]
pub enum FrameworkError {
    #[error(
        "could not find build metadata at `{0}`; rebuild the site with an adapter version \
         that emits it"
    )]
    MissingBuildMeta(PathBuf),

    #[error("failed to read build metadata at `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse build metadata at `{0}`")]
    Parse(PathBuf, #[source] serde_json::Error),

    #[error(
        "the \"edge\" deployment strategy is not supported; switch the site adapter to the \
         \"regional\" strategy and use `server.regions` to deploy to multiple regions"
    )]
    EdgeStrategy,

    #[error("build output directory `{0}` does not exist; run the site build first")]
    MissingOutput(PathBuf),
}

/// Pick the adapter for a site.
///
/// An explicit `site.framework` setting wins. Otherwise the presence of
/// build metadata under `dist/` selects the Astro adapter, and anything
/// else is treated as a plain static site.
pub fn detect(config: &DeployConfig, output_path: &Path) -> Box<dyn Framework> {
    let adapter: Box<dyn Framework> = match config.site.framework.as_deref() {
        Some("astro") => Box::new(Astro),
        Some("static") => Box::new(StaticSite),
        _ => {
            if output_path.join(astro::BUILD_META_FILE).exists() {
                Box::new(Astro)
            } else {
                Box::new(StaticSite)
            }
        }
    };
    debug!("plan"; "using {} adapter", adapter.name());
    adapter
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_framework_wins() {
        let dir = TempDir::new().unwrap();
        let config = test_parse_config("[site]\nframework = \"static\"");
        assert_eq!(detect(&config, dir.path()).name(), "static");
    }

    #[test]
    fn test_build_meta_selects_astro() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("dist")).unwrap();
        fs::write(dir.path().join(astro::BUILD_META_FILE), "{}").unwrap();
        let config = test_parse_config("");
        assert_eq!(detect(&config, dir.path()).name(), "astro");
    }

    #[test]
    fn test_fallback_is_static() {
        let dir = TempDir::new().unwrap();
        let config = test_parse_config("");
        assert_eq!(detect(&config, dir.path()).name(), "static");
    }
}
