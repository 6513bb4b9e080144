//! File-selection rules for the upload batch.
//!
//! Each copy entry gets an ordered rule list: the catch-all unversioned rule
//! first, the versioned-subdirectory rule second, user overrides last. The
//! list is reversed before matching, so user overrides claim files first and
//! the catch-all claims whatever remains. A file is assigned by exactly one
//! rule; rule order is the whole precedence story.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use super::PipelineError;
use crate::config::AssetsSection;
use crate::utils::path::posix_join;

/// Versioned filenames change with content, so they can be cached forever.
pub const VERSIONED_FILES_TTL: u64 = 31_536_000; // 1 year

/// Unversioned files keep a short edge TTL and no browser caching.
pub const NON_VERSIONED_FILES_TTL: u64 = 86_400; // 1 day

/// One file-selection rule.
#[derive(Debug, Clone, PartialEq)]
pub struct FileRule {
    /// Globs selecting files, relative to the copy source directory.
    pub files: Vec<String>,
    /// Globs excluding files from this rule.
    pub ignore: Vec<String>,
    pub cache_control: String,
    /// Content-Type override; inferred from the extension when unset.
    pub content_type: Option<String>,
}

impl FileRule {
    /// Compile this rule's globs.
    pub fn matcher(&self) -> Result<RuleMatcher, PipelineError> {
        Ok(RuleMatcher {
            include: compile_globs(&self.files)?,
            ignore: compile_globs(&self.ignore)?,
        })
    }
}

/// Compiled rule globs. An empty ignore set excludes nothing.
pub struct RuleMatcher {
    include: GlobSet,
    ignore: GlobSet,
}

impl RuleMatcher {
    /// Test a forward-slash relative path against this rule.
    pub fn matches(&self, relative: &str) -> bool {
        self.include.is_match(relative) && !self.ignore.is_match(relative)
    }
}

fn compile_globs(patterns: &[String]) -> Result<GlobSet, PipelineError> {
    let mut set = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| PipelineError::InvalidGlob(pattern.clone(), e))?;
        set.add(glob);
    }
    set.build()
        .map_err(|e| PipelineError::InvalidGlob(patterns.join(", "), e))
}

/// Build the rule list for one copy entry, in natural (lowest-priority
/// first) order. Callers reverse it before matching.
pub fn copy_rules(versioned_sub_dir: Option<&str>, assets: &AssetsSection) -> Vec<FileRule> {
    let mut rules = Vec::new();

    // Unversioned catch-all
    rules.push(FileRule {
        files: vec!["**".to_string()],
        ignore: versioned_sub_dir
            .map(|dir| vec![posix_join(&[dir, "**"])])
            .unwrap_or_default(),
        cache_control: assets
            .non_versioned_files_cache_header
            .clone()
            .unwrap_or_else(|| {
                format!(
                    "public,max-age=0,s-maxage={NON_VERSIONED_FILES_TTL},stale-while-revalidate={NON_VERSIONED_FILES_TTL}"
                )
            }),
        content_type: None,
    });

    // Versioned files
    if let Some(dir) = versioned_sub_dir {
        rules.push(FileRule {
            files: vec![posix_join(&[dir, "**"])],
            ignore: Vec::new(),
            cache_control: assets
                .versioned_files_cache_header
                .clone()
                .unwrap_or_else(|| format!("public,max-age={VERSIONED_FILES_TTL},immutable")),
            content_type: None,
        });
    }

    // User overrides, highest priority
    for entry in &assets.file_options {
        rules.push(FileRule {
            files: entry.files.patterns().to_vec(),
            ignore: entry
                .ignore
                .as_ref()
                .map(|globs| globs.patterns().to_vec())
                .unwrap_or_default(),
            cache_control: entry.cache_control.clone(),
            content_type: entry.content_type.clone(),
        });
    }

    rules
}
