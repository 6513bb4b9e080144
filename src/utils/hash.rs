//! Content hashing using blake3.
//!
//! Uploads are content-addressed and the invalidation fingerprint is a
//! digest over build output, so hashing must be stable across runs and
//! platforms. blake3 gives that plus cheap streaming for large assets.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// A 256-bit content hash (blake3 output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// Create a new ContentHash from raw bytes.
    #[inline]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(self) -> String {
        hex::encode(self.0)
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // First 16 hex chars are plenty for log output
        write!(f, "{}", &self.to_hex()[..16])
    }
}

/// Compute blake3 hash of a file's contents (streaming).
///
/// A missing or unreadable file is an error here, not an empty hash:
/// every file handed to the pipeline is expected to exist, and a silent
/// zero hash would poison the upload batch and the fingerprint.
pub fn hash_file(path: &Path) -> io::Result<ContentHash> {
    let file = File::open(path)?;
    let mut reader = BufReader::with_capacity(64 * 1024, file);
    let mut hasher = blake3::Hasher::new();
    let mut buffer = [0u8; 64 * 1024];

    loop {
        match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => {
                hasher.update(&buffer[..n]);
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(ContentHash::new(*hasher.finalize().as_bytes()))
}

/// Incremental digest for build fingerprints.
///
/// Thin wrapper over `blake3::Hasher` so callers feed it paths and file
/// contents without caring about the underlying hash.
#[derive(Default)]
pub struct Fingerprint {
    hasher: blake3::Hasher,
}

impl Fingerprint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed raw bytes (a relative path, or file content).
    pub fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
    }

    /// Feed a file's content, streaming.
    pub fn update_file(&mut self, path: &Path) -> io::Result<()> {
        let hash = hash_file(path)?;
        self.hasher.update(hash.as_bytes());
        Ok(())
    }

    /// Finish and render as hex.
    pub fn finish(self) -> String {
        self.hasher.finalize().to_hex().to_string()
    }
}
