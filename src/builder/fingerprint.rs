//! Fingerprints for generated files.
//!
//! A generated file is only rewritten when its content hash differs from
//! what is already on disk, so rerunning generation leaves timestamps of
//! unchanged files alone and downstream builds stay incremental.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::util::hash::{sha256_file, sha256_str};

/// State of a generated file compared to its planned contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Freshness {
    /// On disk and identical
    Fresh,
    /// On disk but different
    Stale,
    /// Not on disk
    Missing,
}

/// Content hash of a file that is about to be generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFingerprint {
    pub path: PathBuf,
    pub hash: String,
}

impl FileFingerprint {
    /// Fingerprint planned contents for `path`.
    pub fn of_contents(path: &Path, contents: &str) -> Self {
        FileFingerprint {
            path: path.to_path_buf(),
            hash: sha256_str(contents),
        }
    }

    /// Compare against the file currently at `path`.
    pub fn freshness(&self) -> Result<Freshness> {
        if !self.path.is_file() {
            return Ok(Freshness::Missing);
        }

        let on_disk = sha256_file(&self.path)?;
        if on_disk == self.hash {
            Ok(Freshness::Fresh)
        } else {
            Ok(Freshness::Stale)
        }
    }
}
