//! `validate` command: check configuration and build output without
//! writing anything.

use anyhow::Result;
use std::path::Path;

use crate::config::DeployConfig;
use crate::framework;
use crate::log;
use crate::plan::validate_plan;

use super::resolve_output;

pub fn run(config: &DeployConfig, output: Option<&Path>) -> Result<()> {
    config.validate()?;
    log!("validate"; "configuration ok");

    let output_path = resolve_output(config, output);
    let adapter = framework::detect(config, &output_path);
    let plan = adapter.build_plan(&output_path)?;
    let plan = validate_plan(plan, config)?;

    log!("validate"; "plan ok: {} copy entries, server: {}, {} error responses",
        plan.assets.len(),
        if plan.server.is_some() { "yes" } else { "no" },
        plan.error_responses.len());
    Ok(())
}
