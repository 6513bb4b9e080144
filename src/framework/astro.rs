//! Astro adapter.
//!
//! The Astro build emits `dist/build-meta.json` describing the deployment
//! strategy, output mode, client asset layout, and the route manifest. The
//! adapter turns that into a plan: one cached asset copy, an optional server
//! function, CDN error-page overrides for `/404` and `/500`, and the edge
//! routing injection compiled from the routes.

use serde::Deserialize;
use std::path::Path;

use super::{Framework, FrameworkError};
use crate::plan::{CopyEntry, ErrorResponse, Plan, ServerSpec};
use crate::route::manifest::{RouteDescriptor, RouteKind};
use crate::route::{PageResolution, compile_routes, routing_injection};

/// Build metadata location, relative to the build output root.
pub const BUILD_META_FILE: &str = "dist/build-meta.json";

/// Build metadata emitted by the Astro build adapter.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildMeta {
    #[serde(default)]
    pub deployment_strategy: Option<String>,
    pub output_mode: String,
    pub page_resolution: PageResolution,
    #[serde(default)]
    pub response_mode: Option<String>,
    pub client_build_output_dir: String,
    #[serde(default)]
    pub client_build_versioned_sub_dir: Option<String>,
    #[serde(default)]
    pub routes: Vec<RouteDescriptor>,
}

pub struct Astro;

impl Framework for Astro {
    fn name(&self) -> &'static str {
        "astro"
    }

    fn build_plan(&self, output_path: &Path) -> Result<Plan, FrameworkError> {
        let meta = load_build_meta(output_path)?;
        if meta.deployment_strategy.as_deref() == Some("edge") {
            return Err(FrameworkError::EdgeStrategy);
        }

        let is_static = meta.output_mode == "static";
        let server = if is_static {
            None
        } else {
            Some(ServerSpec {
                handler: "dist/server/entry.handler".to_string(),
                streaming: meta.response_mode.as_deref() == Some("stream"),
            })
        };

        Ok(Plan {
            server,
            assets: vec![CopyEntry {
                from: meta.client_build_output_dir.clone(),
                to: String::new(),
                cached: true,
                versioned_sub_dir: meta.client_build_versioned_sub_dir.clone(),
            }],
            error_responses: error_responses(&meta.routes, is_static),
            routing_injection: Some(routing_injection(
                &compile_routes(&meta.routes),
                meta.page_resolution,
            )),
            ..Plan::default()
        })
    }
}

/// Read and parse the build metadata under `output_path`.
pub fn load_build_meta(output_path: &Path) -> Result<BuildMeta, FrameworkError> {
    let path = output_path.join(BUILD_META_FILE);
    if !path.exists() {
        return Err(FrameworkError::MissingBuildMeta(path));
    }
    let content =
        std::fs::read_to_string(&path).map_err(|e| FrameworkError::Io(path.clone(), e))?;
    serde_json::from_str(&content).map_err(|e| FrameworkError::Parse(path, e))
}

/// CDN error-page overrides for the site's `/404` and `/500` pages.
///
/// Static sites also map origin 403s to the 404 page: a missing object
/// surfaces as access-denied from private storage.
fn error_responses(routes: &[RouteDescriptor], is_static: bool) -> Vec<ErrorResponse> {
    let mut responses = Vec::new();
    for route in routes {
        if route.kind != RouteKind::Page {
            continue;
        }
        let Some(path) = route.route.as_deref() else {
            continue;
        };
        if path == "/404" || path == "/404/" {
            responses.push(ErrorResponse {
                error_code: 404,
                response_page_path: if route.prerender { "/404.html" } else { "/404" }.to_string(),
                response_code: 404,
            });
            if is_static {
                responses.push(ErrorResponse {
                    error_code: 403,
                    response_page_path: "/404.html".to_string(),
                    response_code: 404,
                });
            }
        }
        if path == "/500" || path == "/500/" {
            responses.push(ErrorResponse {
                error_code: 500,
                response_page_path: if route.prerender { "/500.html" } else { "/500" }.to_string(),
                response_code: 500,
            });
        }
    }
    responses
}
