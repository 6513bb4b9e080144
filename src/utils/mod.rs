//! Shared utilities: hashing, MIME detection, path normalization.

pub mod hash;
pub mod mime;
pub mod path;
