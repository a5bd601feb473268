//! Implementation of `umbrella init`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::core::manifest::{generate_manifest, MANIFEST_NAME};
use crate::core::module_name::ModuleName;
use crate::util::fs;

/// Write a starter Umbrella.toml declaring `module` into `dir`.
pub fn init_manifest(dir: &Path, module: &str) -> Result<PathBuf> {
    let name = ModuleName::new(module)?;

    let manifest_path = dir.join(MANIFEST_NAME);
    if manifest_path.exists() {
        bail!("`{}` already exists in `{}`", MANIFEST_NAME, dir.display());
    }

    fs::write_string(&manifest_path, &generate_manifest(name.as_str()))?;
    tracing::info!("created {}", manifest_path.display());

    Ok(manifest_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::manifest::Manifest;
    use tempfile::TempDir;

    #[test]
    fn test_init_manifest() {
        let tmp = TempDir::new().unwrap();
        let path = init_manifest(tmp.path(), "RNWorklets").unwrap();

        let manifest = Manifest::load(&path).unwrap();
        assert_eq!(manifest.modules[0].name().as_str(), "RNWorklets");
    }

    #[test]
    fn test_init_fails_if_manifest_exists() {
        let tmp = TempDir::new().unwrap();
        init_manifest(tmp.path(), "A").unwrap();
        let err = init_manifest(tmp.path(), "B").unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_init_rejects_invalid_name() {
        let tmp = TempDir::new().unwrap();
        assert!(init_manifest(tmp.path(), "bad name").is_err());
        assert!(!tmp.path().join(MANIFEST_NAME).exists());
    }
}
