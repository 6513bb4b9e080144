//! Asset & invalidation pipeline.
//!
//! Consumes the plan's copy manifest plus the build output directory and
//! produces the two outputs the provisioning engine needs: a
//! content-addressed upload batch with cache headers assigned, and an
//! invalidation plan with a deterministic build fingerprint so redeploys of
//! unchanged output never pay an invalidation cost.

pub mod invalidation;
pub mod rules;
pub mod upload;

pub use invalidation::{InvalidationPlan, build_invalidation};
pub use rules::{FileRule, NON_VERSIONED_FILES_TTL, VERSIONED_FILES_TTL, copy_rules};
pub use upload::{BucketFile, build_upload_batch};

use std::path::PathBuf;
use thiserror::Error;

/// Pipeline errors. All are fatal to the deployment step; there is no
/// partial-success mode.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid glob pattern `{0}`")]
    InvalidGlob(String, #[source] globset::Error),

    #[error("failed to read `{0}` while building the upload batch")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("failed to read `{0}` while fingerprinting the build")]
    Fingerprint(PathBuf, #[source] std::io::Error),
}
