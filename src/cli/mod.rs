//! CLI command implementations.

pub mod args;
pub mod compile;
pub mod routes;
pub mod validate;

pub use args::{Cli, Commands};

use std::path::{Path, PathBuf};

use crate::config::DeployConfig;

/// The build output directory a command operates on: the explicit
/// `--output` flag, or the configured site path.
pub fn resolve_output(config: &DeployConfig, output: Option<&Path>) -> PathBuf {
    match output {
        Some(path) => path.to_path_buf(),
        None => config.site_root(),
    }
}
