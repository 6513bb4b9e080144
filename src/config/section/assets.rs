//! `[assets]` section configuration.
//!
//! Controls the cache headers assigned to uploaded files and any extra
//! file-selection rules layered on top of the defaults.
//!
//! # Example
//!
//! ```toml
//! [assets]
//! versioned_files_cache_header = "public,max-age=31536000,immutable"
//! non_versioned_files_cache_header = "public,max-age=0,s-maxage=86400"
//!
//! [[assets.file_options]]
//! files = ["**/*.zip", "**/*.tar"]
//! ignore = "drafts/**"
//! cache_control = "private,no-cache,no-store,must-revalidate"
//! ```

use serde::{Deserialize, Serialize};

/// Asset upload configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsSection {
    /// Cache-Control header for files under a versioned subdirectory.
    /// Defaults to one year, immutable.
    pub versioned_files_cache_header: Option<String>,

    /// Cache-Control header for all other files.
    /// Defaults to no browser caching with one day at the CDN edge.
    pub non_versioned_files_cache_header: Option<String>,

    /// Additional file-selection rules. Later rules take precedence over
    /// earlier ones, and all of them take precedence over the defaults.
    pub file_options: Vec<FileOptionEntry>,
}

/// One user-supplied file-selection rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOptionEntry {
    /// Glob pattern(s) selecting files, relative to the copy source
    /// directory. A bare string or a list.
    pub files: GlobList,

    /// Glob pattern(s) of files to exclude from this rule.
    pub ignore: Option<GlobList>,

    /// Cache-Control header assigned to matched files.
    pub cache_control: String,

    /// Content-Type override. Inferred from the file extension when unset.
    pub content_type: Option<String>,
}

impl Default for FileOptionEntry {
    fn default() -> Self {
        Self {
            files: GlobList::One("**".to_string()),
            ignore: None,
            cache_control: String::new(),
            content_type: None,
        }
    }
}

/// One or more glob patterns. A bare string and a one-element list parse
/// to the same rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GlobList {
    One(String),
    Many(Vec<String>),
}

impl GlobList {
    pub fn patterns(&self) -> &[String] {
        match self {
            GlobList::One(one) => std::slice::from_ref(one),
            GlobList::Many(many) => many,
        }
    }
}

impl AssetsSection {
    /// Validate asset configuration.
    ///
    /// # Checks
    /// - Every `file_options` glob must compile.
    /// - Every `file_options` entry must set a cache-control header.
    pub fn validate(&self, diag: &mut crate::config::ConfigDiagnostics) {
        for entry in &self.file_options {
            for pattern in entry.files.patterns() {
                if globset::Glob::new(pattern).is_err() {
                    diag.error(
                        "assets.file_options.files",
                        format!("invalid glob pattern `{pattern}`"),
                    );
                }
            }
            for pattern in entry.ignore.iter().flat_map(GlobList::patterns) {
                if globset::Glob::new(pattern).is_err() {
                    diag.error(
                        "assets.file_options.ignore",
                        format!("invalid glob pattern `{pattern}`"),
                    );
                }
            }
            if entry.cache_control.is_empty() {
                diag.error_with_hint(
                    "assets.file_options.cache_control",
                    format!(
                        "rule `{}` has no cache-control header",
                        entry.files.patterns().join(", ")
                    ),
                    "set cache_control, e.g. \"public,max-age=86400\"",
                );
            }
        }
    }
}
