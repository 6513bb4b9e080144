//! Invalidation plan construction.
//!
//! Decides which CDN paths to mark stale and computes a deterministic build
//! fingerprint so the provisioning engine only issues an invalidation when
//! the deployed content actually changed. Versioned files contribute their
//! relative paths to the fingerprint (a content change renames them);
//! unversioned files contribute their contents.

use std::path::Path;

use super::PipelineError;
use crate::config::{InvalidationPaths, InvalidationSection, PathMode};
use crate::debug;
use crate::plan::Plan;
use crate::utils::hash::Fingerprint;
use crate::utils::path::{posix_join, relative_files_sorted};

/// What the provisioning engine needs to run one invalidation.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct InvalidationPlan {
    /// CDN paths to mark stale, leading slash included.
    pub paths: Vec<String>,
    /// Fingerprint of the deployed content. Two deploys with equal versions
    /// are the same content and need no new invalidation.
    pub version: String,
    /// Block the deploy until the CDN finishes invalidating.
    pub wait: bool,
}

/// Build the invalidation plan, or `None` when no invalidation should run.
///
/// Skipped when the step is disabled, when no copy entry is cached at the
/// CDN (nothing stale to clear), or when the configured path set is empty.
pub fn build_invalidation(
    output_path: &Path,
    plan: &Plan,
    invalidation: &InvalidationSection,
) -> Result<Option<InvalidationPlan>, PipelineError> {
    if !invalidation.enabled {
        debug!("invalidation"; "disabled, skipping");
        return Ok(None);
    }
    let cached: Vec<_> = plan.assets.iter().filter(|copy| copy.cached).collect();
    if cached.is_empty() {
        debug!("invalidation"; "no cached copy entries, skipping");
        return Ok(None);
    }

    let paths = match &invalidation.paths {
        InvalidationPaths::Mode(PathMode::All) => vec!["/*".to_string()],
        InvalidationPaths::Mode(PathMode::Versioned) => cached
            .iter()
            .filter_map(|copy| {
                copy.versioned_sub_dir
                    .as_deref()
                    .map(|dir| format!("/{}", posix_join(&[&copy.to, dir, "*"])))
            })
            .collect(),
        InvalidationPaths::List(paths) => paths.clone(),
    };
    if paths.is_empty() {
        debug!("invalidation"; "empty path set, skipping");
        return Ok(None);
    }

    let version = match &plan.build_id {
        Some(build_id) => build_id.clone(),
        None => fingerprint_build(output_path, &cached, &invalidation.paths)?,
    };

    Ok(Some(InvalidationPlan {
        paths,
        version,
        wait: invalidation.wait,
    }))
}

/// Digest the cached copy entries into a version string.
///
/// In versioned mode only the versioned file names matter: unversioned
/// content is never invalidated by that path set, so it must not perturb
/// the fingerprint.
fn fingerprint_build(
    output_path: &Path,
    cached: &[&crate::plan::CopyEntry],
    paths: &InvalidationPaths,
) -> Result<String, PipelineError> {
    let versioned_only = matches!(paths, InvalidationPaths::Mode(PathMode::Versioned));
    let mut digest = Fingerprint::new();

    for copy in cached {
        let source_root = output_path.join(&copy.from);
        let versioned_prefix = copy
            .versioned_sub_dir
            .as_deref()
            .map(|dir| format!("{dir}/"));

        for file in relative_files_sorted(&source_root) {
            let versioned = versioned_prefix
                .as_deref()
                .is_some_and(|prefix| file.starts_with(prefix));
            if versioned {
                digest.update(file.as_bytes());
            } else if !versioned_only {
                let path = source_root.join(&file);
                digest
                    .update_file(&path)
                    .map_err(|e| PipelineError::Fingerprint(path, e))?;
            }
        }
    }

    Ok(digest.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::CopyEntry;
    use std::fs;
    use tempfile::TempDir;

    fn section(paths: InvalidationPaths) -> InvalidationSection {
        InvalidationSection {
            paths,
            ..InvalidationSection::default()
        }
    }

    fn cached_plan(versioned: Option<&str>) -> Plan {
        Plan {
            assets: vec![CopyEntry {
                from: "client".to_string(),
                to: String::new(),
                cached: true,
                versioned_sub_dir: versioned.map(String::from),
            }],
            ..Plan::default()
        }
    }

    fn write_site(root: &Path) {
        let client = root.join("client");
        fs::create_dir_all(client.join("_dist")).unwrap();
        fs::write(client.join("index.html"), "<html>v1</html>").unwrap();
        fs::write(client.join("_dist/app.12ab.js"), "console.log(1)").unwrap();
    }

    #[test]
    fn test_disabled_produces_none() {
        let dir = TempDir::new().unwrap();
        write_site(dir.path());
        let section = InvalidationSection {
            enabled: false,
            ..InvalidationSection::default()
        };
        let result = build_invalidation(dir.path(), &cached_plan(None), &section).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_no_cached_entries_produces_none() {
        let dir = TempDir::new().unwrap();
        write_site(dir.path());
        let mut plan = cached_plan(None);
        plan.assets[0].cached = false;
        let result =
            build_invalidation(dir.path(), &plan, &InvalidationSection::default()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_empty_path_set_produces_none() {
        let dir = TempDir::new().unwrap();
        write_site(dir.path());

        // Versioned mode with no versioned subdirectory resolves to no paths
        let result = build_invalidation(
            dir.path(),
            &cached_plan(None),
            &section(InvalidationPaths::Mode(PathMode::Versioned)),
        )
        .unwrap();
        assert!(result.is_none());

        let result = build_invalidation(
            dir.path(),
            &cached_plan(None),
            &section(InvalidationPaths::List(Vec::new())),
        )
        .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_all_mode_single_wildcard() {
        let dir = TempDir::new().unwrap();
        write_site(dir.path());
        let result = build_invalidation(
            dir.path(),
            &cached_plan(Some("_dist")),
            &InvalidationSection::default(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(result.paths, vec!["/*".to_string()]);
        assert!(!result.wait);
    }

    #[test]
    fn test_versioned_mode_paths() {
        let dir = TempDir::new().unwrap();
        write_site(dir.path());
        let mut plan = cached_plan(Some("_dist"));
        plan.assets[0].to = "site".to_string();
        let result = build_invalidation(
            dir.path(),
            &plan,
            &section(InvalidationPaths::Mode(PathMode::Versioned)),
        )
        .unwrap()
        .unwrap();
        assert_eq!(result.paths, vec!["/site/_dist/*".to_string()]);
    }

    #[test]
    fn test_explicit_paths_verbatim() {
        let dir = TempDir::new().unwrap();
        write_site(dir.path());
        let paths = vec!["/index.html".to_string(), "/products/*".to_string()];
        let result = build_invalidation(
            dir.path(),
            &cached_plan(None),
            &section(InvalidationPaths::List(paths.clone())),
        )
        .unwrap()
        .unwrap();
        assert_eq!(result.paths, paths);
    }

    #[test]
    fn test_build_id_used_verbatim() {
        let dir = TempDir::new().unwrap();
        write_site(dir.path());
        let mut plan = cached_plan(None);
        plan.build_id = Some("build-42".to_string());
        let result =
            build_invalidation(dir.path(), &plan, &InvalidationSection::default())
                .unwrap()
                .unwrap();
        assert_eq!(result.version, "build-42");
    }

    #[test]
    fn test_fingerprint_idempotent() {
        let dir = TempDir::new().unwrap();
        write_site(dir.path());
        let plan = cached_plan(Some("_dist"));
        let section = InvalidationSection::default();

        let first = build_invalidation(dir.path(), &plan, &section)
            .unwrap()
            .unwrap();
        let second = build_invalidation(dir.path(), &plan, &section)
            .unwrap()
            .unwrap();
        assert_eq!(first.version, second.version);
    }

    #[test]
    fn test_fingerprint_sees_unversioned_content_change() {
        let dir = TempDir::new().unwrap();
        write_site(dir.path());
        let plan = cached_plan(Some("_dist"));
        let section = InvalidationSection::default();

        let before = build_invalidation(dir.path(), &plan, &section)
            .unwrap()
            .unwrap();
        fs::write(dir.path().join("client/index.html"), "<html>v2</html>").unwrap();
        let after = build_invalidation(dir.path(), &plan, &section)
            .unwrap()
            .unwrap();
        assert_ne!(before.version, after.version);
    }

    #[test]
    fn test_fingerprint_sees_dotfile_change() {
        let dir = TempDir::new().unwrap();
        write_site(dir.path());
        fs::write(dir.path().join("client/.htaccess"), "Deny from all").unwrap();
        let plan = cached_plan(Some("_dist"));
        let section = InvalidationSection::default();

        let before = build_invalidation(dir.path(), &plan, &section)
            .unwrap()
            .unwrap();
        fs::write(dir.path().join("client/.htaccess"), "Allow from all").unwrap();
        let after = build_invalidation(dir.path(), &plan, &section)
            .unwrap()
            .unwrap();
        assert_ne!(before.version, after.version);
    }

    #[test]
    fn test_versioned_mode_ignores_unversioned_content() {
        let dir = TempDir::new().unwrap();
        write_site(dir.path());
        let plan = cached_plan(Some("_dist"));
        let section = section(InvalidationPaths::Mode(PathMode::Versioned));

        let before = build_invalidation(dir.path(), &plan, &section)
            .unwrap()
            .unwrap();
        fs::write(dir.path().join("client/index.html"), "<html>v2</html>").unwrap();
        let unchanged = build_invalidation(dir.path(), &plan, &section)
            .unwrap()
            .unwrap();
        assert_eq!(before.version, unchanged.version);

        // A versioned file rename changes the fingerprint
        fs::rename(
            dir.path().join("client/_dist/app.12ab.js"),
            dir.path().join("client/_dist/app.34cd.js"),
        )
        .unwrap();
        let renamed = build_invalidation(dir.path(), &plan, &section)
            .unwrap()
            .unwrap();
        assert_ne!(before.version, renamed.version);
    }
}
