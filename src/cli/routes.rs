//! `routes` command: print the routing artifact, or simulate one request.

use anyhow::Result;
use std::path::Path;

use crate::config::DeployConfig;
use crate::framework::astro;
use crate::log;
use crate::route::{RouteAction, RouteMatcher, compile_routes, serialize_route_tree};

use super::resolve_output;

pub fn run(config: &DeployConfig, output: Option<&Path>, request: Option<&str>) -> Result<()> {
    let output_path = resolve_output(config, output);
    let meta = astro::load_build_meta(&output_path)?;
    let entries = compile_routes(&meta.routes);

    match request {
        Some(path) => match RouteMatcher::new(&entries).evaluate(path, meta.page_resolution) {
            Some(RouteAction::Rewrite(target)) => {
                log!("routes"; "{path} rewrites to {target}");
            }
            Some(RouteAction::Redirect { location, status }) => {
                log!("routes"; "{path} redirects to {location} ({status})");
            }
            Some(RouteAction::Passthrough) => {
                log!("routes"; "{path} serves from storage as-is");
            }
            None => {
                log!("routes"; "{path} has no static match, falls through to the server");
            }
        },
        None => println!("{}", serialize_route_tree(&entries)),
    }
    Ok(())
}
