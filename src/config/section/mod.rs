//! Configuration sections, one module per TOML table.

pub mod assets;
pub mod cdn;
pub mod invalidation;
pub mod server;
pub mod site;

pub use assets::{AssetsSection, FileOptionEntry, GlobList};
pub use cdn::CdnSection;
pub use invalidation::{InvalidationPaths, InvalidationSection, PathMode};
pub use server::{SUPPORTED_REGIONS, ServerSection};
pub use site::SiteSection;
