//! `compile` command: the full artifact run.
//!
//! Plan, upload batch, invalidation plan, and routing function are written
//! to the artifact directory as separate files so the provisioning engine
//! can consume each independently.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::config::DeployConfig;
use crate::framework;
use crate::log;
use crate::pipeline::{build_invalidation, build_upload_batch};
use crate::plan::validate_plan;

use super::resolve_output;

pub fn run(config: &DeployConfig, output: Option<&Path>) -> Result<()> {
    config.validate()?;
    let output_path = resolve_output(config, output);

    let adapter = framework::detect(config, &output_path);
    let plan = adapter.build_plan(&output_path)?;
    let plan = validate_plan(plan, config)?;

    let batch = build_upload_batch(&output_path, &plan, &config.assets)?;
    let invalidation = build_invalidation(&output_path, &plan, &config.invalidation)?;

    let artifacts = config.artifacts_dir();
    fs::create_dir_all(&artifacts)
        .with_context(|| format!("creating artifact directory `{}`", artifacts.display()))?;

    write_json(&artifacts.join("plan.json"), &plan)?;
    write_json(&artifacts.join("upload.json"), &batch)?;
    write_json(&artifacts.join("invalidation.json"), &invalidation)?;
    if let Some(injection) = &plan.routing_injection {
        fs::write(artifacts.join("router.js"), injection)
            .with_context(|| format!("writing `{}`", artifacts.join("router.js").display()))?;
    }

    log!("compile"; "{} files in upload batch", batch.len());
    match &invalidation {
        Some(inv) => log!("compile"; "invalidation: {} paths, version {}", inv.paths.len(), inv.version),
        None => log!("compile"; "invalidation skipped"),
    }
    log!("compile"; "artifacts written to {}", artifacts.display());
    Ok(())
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value)?;
    fs::write(path, rendered).with_context(|| format!("writing `{}`", path.display()))
}
