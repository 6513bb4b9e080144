//! Plain static-site adapter.
//!
//! No build metadata, no server, no routing injection: the whole output
//! directory is uploaded as cached assets, and a top-level `404.html` is
//! wired up as the custom error page when present.

use std::path::Path;

use super::{Framework, FrameworkError};
use crate::plan::{CopyEntry, Plan};

pub struct StaticSite;

impl Framework for StaticSite {
    fn name(&self) -> &'static str {
        "static"
    }

    fn build_plan(&self, output_path: &Path) -> Result<Plan, FrameworkError> {
        if !output_path.is_dir() {
            return Err(FrameworkError::MissingOutput(output_path.to_path_buf()));
        }

        Ok(Plan {
            assets: vec![CopyEntry {
                from: String::new(),
                to: String::new(),
                cached: true,
                versioned_sub_dir: None,
            }],
            custom_404: output_path
                .join("404.html")
                .exists()
                .then(|| "/404.html".to_string()),
            ..Plan::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_whole_directory_copied() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.html"), "<html></html>").unwrap();

        let plan = StaticSite.build_plan(dir.path()).unwrap();
        assert_eq!(plan.assets.len(), 1);
        assert_eq!(plan.assets[0].from, "");
        assert!(plan.server.is_none());
        assert!(plan.routing_injection.is_none());
        assert!(plan.custom_404.is_none());
    }

    #[test]
    fn test_custom_404_detected() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("404.html"), "not found").unwrap();

        let plan = StaticSite.build_plan(dir.path()).unwrap();
        assert_eq!(plan.custom_404.as_deref(), Some("/404.html"));
    }

    #[test]
    fn test_missing_output_is_error() {
        let err = StaticSite
            .build_plan(Path::new("/nonexistent/out"))
            .unwrap_err();
        assert!(matches!(err, FrameworkError::MissingOutput(_)));
    }
}
