//! Workspace - central configuration hub.
//!
//! A Workspace ties a loaded manifest to its configuration and decides,
//! for each module, the settings a generation uses.

use std::path::{Path, PathBuf};

use anyhow::Result;
use thiserror::Error;

use crate::core::consumer::{Consumer, Platform};
use crate::core::manifest::{Manifest, ModuleManifest, DEFAULT_OUTPUT_DIR, MANIFEST_NAME};
use crate::util::config::Config;
use crate::util::diagnostic::suggestions;
use crate::util::GlobalContext;

/// Error locating a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error(
        "could not find `Umbrella.toml` in `{}` or any parent directory\n{}",
        dir.display(),
        suggestions::NO_MANIFEST
    )]
    NotFound { dir: PathBuf },
}

/// Look for the manifest in `dir` (not its parents).
pub fn find_manifest(dir: &Path) -> Result<PathBuf, ManifestError> {
    let candidate = dir.join(MANIFEST_NAME);
    if candidate.is_file() {
        Ok(candidate)
    } else {
        Err(ManifestError::NotFound {
            dir: dir.to_path_buf(),
        })
    }
}

/// Command-line overrides that beat every other settings source.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverride {
    pub consumer: Option<Consumer>,
    pub platform: Option<Platform>,
    pub modulemap: Option<bool>,
    pub version_source: Option<bool>,
}

/// Settings resolved for one module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleSettings {
    pub consumer: Consumer,
    pub platform: Platform,
    pub modulemap: bool,
    pub version_source: bool,
}

/// A loaded manifest with its configuration.
#[derive(Debug)]
pub struct Workspace {
    manifest: Manifest,
    manifest_path: PathBuf,
    config: Config,
    output_dir: PathBuf,
}

impl Workspace {
    /// Create a new workspace from a manifest path.
    pub fn new(manifest_path: &Path, ctx: &GlobalContext) -> Result<Self> {
        let manifest = Manifest::load(manifest_path)?;
        let config = ctx.config_for(&manifest.manifest_dir);
        Ok(Self::from_parts(manifest, manifest_path.to_path_buf(), config))
    }

    /// Create a workspace from an already-parsed manifest.
    pub fn from_parts(manifest: Manifest, manifest_path: PathBuf, config: Config) -> Self {
        let dir = manifest
            .settings
            .output_dir
            .clone()
            .or_else(|| config.generate.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
        let output_dir = manifest.manifest_dir.join(dir);

        Workspace {
            manifest,
            manifest_path,
            config,
            output_dir,
        }
    }

    /// Write generated files somewhere else.
    pub fn with_output_dir(mut self, output_dir: PathBuf) -> Self {
        self.output_dir = output_dir;
        self
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// Directory receiving generated files.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Directory receiving one module's generated files.
    pub fn module_dir(&self, module: &ModuleManifest) -> PathBuf {
        self.output_dir.join(module.name().as_str())
    }

    /// Resolve the settings for a module.
    ///
    /// Order of precedence (highest to lowest): command line, module
    /// table, `[settings]`, configuration files, defaults.
    pub fn settings_for(&self, module: &ModuleManifest, cli: &SettingsOverride) -> ModuleSettings {
        let settings = &self.manifest.settings;
        let config = &self.config.generate;

        ModuleSettings {
            consumer: cli
                .consumer
                .or(module.consumer)
                .or(settings.consumer)
                .or(config.consumer)
                .unwrap_or_default(),
            platform: cli
                .platform
                .or(module.platform)
                .or(settings.platform)
                .or(config.platform)
                .unwrap_or_default(),
            modulemap: cli
                .modulemap
                .or(module.modulemap)
                .or(settings.modulemap)
                .or(config.modulemap)
                .unwrap_or(true),
            version_source: cli
                .version_source
                .or(module.version_source)
                .or(settings.version_source)
                .or(config.version_source)
                .unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_workspace(dir: &Path) -> PathBuf {
        let manifest_path = dir.join(MANIFEST_NAME);
        std::fs::write(
            &manifest_path,
            r#"
[settings]
consumer = "plain"

[[module]]
name = "RNWorklets"
headers = ["Tools/Defs.h"]

[[module]]
name = "React-RCTFBReactNativeSpec"
consumer = "ui-framework"
modulemap = false
headers = ["FBReactNativeSpecJSI.h"]
"#,
        )
        .unwrap();
        manifest_path
    }

    #[test]
    fn test_workspace_creation() {
        let tmp = TempDir::new().unwrap();
        let manifest_path = create_test_workspace(tmp.path());
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf()).with_global_config(None);

        let ws = Workspace::new(&manifest_path, &ctx).unwrap();
        assert_eq!(ws.manifest().modules.len(), 2);
        assert_eq!(ws.output_dir(), tmp.path().join(DEFAULT_OUTPUT_DIR));
        assert_eq!(
            ws.module_dir(&ws.manifest().modules[0]),
            tmp.path().join(DEFAULT_OUTPUT_DIR).join("RNWorklets")
        );
    }

    #[test]
    fn test_settings_precedence() {
        let tmp = TempDir::new().unwrap();
        let manifest_path = create_test_workspace(tmp.path());
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf()).with_global_config(None);
        let ws = Workspace::new(&manifest_path, &ctx).unwrap();

        let worklets = &ws.manifest().modules[0];
        let codegen = &ws.manifest().modules[1];
        let none = SettingsOverride::default();

        let s = ws.settings_for(worklets, &none);
        assert_eq!(s.consumer, Consumer::Plain);
        assert_eq!(s.platform, Platform::Ios);
        assert!(s.modulemap);
        assert!(!s.version_source);

        let s = ws.settings_for(codegen, &none);
        assert_eq!(s.consumer, Consumer::UiFramework);
        assert!(!s.modulemap);

        let cli = SettingsOverride {
            consumer: Some(Consumer::Plain),
            ..Default::default()
        };
        assert_eq!(ws.settings_for(codegen, &cli).consumer, Consumer::Plain);
    }

    #[test]
    fn test_config_output_dir_is_used() {
        let tmp = TempDir::new().unwrap();
        create_test_workspace(tmp.path());
        let manifest = Manifest::load(&tmp.path().join(MANIFEST_NAME)).unwrap();
        let mut config = Config::default();
        config.generate.output_dir = Some(PathBuf::from("Generated"));

        let ws = Workspace::from_parts(manifest, tmp.path().join(MANIFEST_NAME), config);
        assert_eq!(ws.output_dir(), tmp.path().join("Generated"));
    }

    #[test]
    fn test_find_manifest_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = find_manifest(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("Umbrella.toml"));
    }
}
