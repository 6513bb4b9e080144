//! Route matcher compiler.
//!
//! Turns a site build's route manifest into a compact matcher artifact for
//! the CDN edge function: manifest → prefix tree → flattened nested arrays →
//! serialized data plus interpreter snippet.

pub mod codegen;
pub mod eval;
pub mod flatten;
pub mod manifest;
pub mod tree;

pub use codegen::{PageResolution, routing_injection, serialize_route_tree};
pub use eval::{RouteAction, RouteMatcher};
pub use flatten::{FlatEntry, flatten_route_tree};
pub use manifest::{ManifestError, RouteDescriptor, RouteKind, load_route_manifest};
pub use tree::build_route_tree;

/// Compile a route manifest into the flattened matcher in one step.
pub fn compile_routes(routes: &[RouteDescriptor]) -> Vec<FlatEntry> {
    flatten_route_tree(&build_route_tree(routes, 0), "")
}
