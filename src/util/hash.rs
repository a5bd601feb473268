//! SHA-256 helpers for generated-file fingerprints.

use std::path::Path;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

/// Hex SHA-256 of a string.
pub fn sha256_str(s: &str) -> String {
    hex::encode(Sha256::digest(s.as_bytes()))
}

/// Hex SHA-256 of a file on disk.
///
/// Generated files are small, so the whole file is read at once.
pub fn sha256_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read {} for hashing", path.display()))?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

/// Incremental hash over a sequence of string parts.
///
/// Parts are NUL-separated so `["ab", "c"]` and `["a", "bc"]` differ.
#[derive(Default)]
pub struct Fingerprint {
    hasher: Sha256,
}

impl Fingerprint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_str(&mut self, part: &str) -> &mut Self {
        self.hasher.update(part.as_bytes());
        self.hasher.update(b"\0");
        self
    }

    /// First 16 hex characters of the digest.
    pub fn finish_short(self) -> String {
        let mut hex = hex::encode(self.hasher.finalize());
        hex.truncate(16);
        hex
    }
}
