//! Upload batch construction.
//!
//! Walks each copy entry's source directory once, lets the reversed rule
//! list claim files (highest priority first), and emits one content-hashed
//! upload descriptor per file. The hash is content-addressed so the storage
//! collaborator can skip unchanged objects on re-upload.

use rayon::prelude::*;
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::{PipelineError, rules};
use crate::config::AssetsSection;
use crate::debug;
use crate::plan::Plan;
use crate::utils::hash::hash_file;
use crate::utils::mime;
use crate::utils::path::{posix_join, relative_files_sorted};

/// One file to upload: where it lives, where it goes, and the headers it
/// gets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketFile {
    pub source: PathBuf,
    pub key: String,
    pub hash: String,
    pub cache_control: String,
    pub content_type: String,
}

/// A copy operation as the upload loop sees it. The ISR cache entry joins
/// the plan's asset entries here with its versioned marker cleared.
struct CopySource<'a> {
    from: &'a str,
    to: &'a str,
    versioned_sub_dir: Option<&'a str>,
}

/// Build the ordered upload batch for a plan.
///
/// Invariant: every file is claimed by exactly one rule, the
/// highest-priority rule that matches it, so each file gets exactly one
/// cache-control/content-type pair.
pub fn build_upload_batch(
    output_path: &Path,
    plan: &Plan,
    assets: &AssetsSection,
) -> Result<Vec<BucketFile>, PipelineError> {
    let mut copies: Vec<CopySource> = plan
        .assets
        .iter()
        .map(|copy| CopySource {
            from: &copy.from,
            to: &copy.to,
            versioned_sub_dir: copy.versioned_sub_dir.as_deref(),
        })
        .collect();
    if let Some(isr) = &plan.isr_cache {
        copies.push(CopySource {
            from: &isr.from,
            to: &isr.to,
            versioned_sub_dir: None,
        });
    }

    let mut batch = Vec::new();
    for copy in &copies {
        let source_root = output_path.join(copy.from);
        let files = relative_files_sorted(&source_root);
        let mut claimed: FxHashSet<&str> = FxHashSet::default();

        let rule_list = rules::copy_rules(copy.versioned_sub_dir, assets);
        for rule in rule_list.iter().rev() {
            let matcher = rule.matcher()?;
            let selected: Vec<&str> = files
                .iter()
                .map(String::as_str)
                .filter(|file| matcher.matches(file) && !claimed.contains(file))
                .collect();
            debug!("assets"; "rule `{}` claimed {} files", rule.files.join(", "), selected.len());

            let descriptors = selected
                .par_iter()
                .map(|file| {
                    let source = source_root.join(file);
                    let hash = hash_file(&source)
                        .map_err(|e| PipelineError::Read(source.clone(), e))?;
                    Ok(BucketFile {
                        key: posix_join(&[copy.to, file]),
                        hash: hash.to_hex(),
                        cache_control: rule.cache_control.clone(),
                        content_type: rule
                            .content_type
                            .clone()
                            .unwrap_or_else(|| mime::from_path(&source).to_string()),
                        source,
                    })
                })
                .collect::<Result<Vec<_>, PipelineError>>()?;

            batch.extend(descriptors);
            claimed.extend(selected);
        }
    }

    Ok(batch)
}
