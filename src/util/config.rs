//! Configuration file support for Umbrella.
//!
//! Two configuration file locations are read:
//! - Global: `~/.umbrella/config.toml` - User-wide defaults
//! - Project: `.umbrella/config.toml` next to the manifest
//!
//! Project config takes precedence over global config. Both are weaker
//! than anything the manifest or the command line says.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::consumer::{Consumer, Platform};

/// Umbrella configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Generation defaults
    pub generate: GenerateConfig,
}

/// Defaults for `umbrella generate`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Default consumer toolchain (ui-framework, plain)
    pub consumer: Option<Consumer>,

    /// Default platform (ios, tvos, visionos, watchos, macos)
    pub platform: Option<Platform>,

    /// Default output directory, relative to the manifest
    pub output_dir: Option<PathBuf>,

    /// Emit module maps unless the manifest says otherwise
    pub modulemap: Option<bool>,

    /// Emit version sources unless the manifest says otherwise
    pub version_source: Option<bool>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        let gen = other.generate;
        if gen.consumer.is_some() {
            self.generate.consumer = gen.consumer;
        }
        if gen.platform.is_some() {
            self.generate.platform = gen.platform;
        }
        if gen.output_dir.is_some() {
            self.generate.output_dir = gen.output_dir;
        }
        if gen.modulemap.is_some() {
            self.generate.modulemap = gen.modulemap;
        }
        if gen.version_source.is_some() {
            self.generate.version_source = gen.version_source;
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.umbrella/config.toml)
/// 2. Global config (~/.umbrella/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        if global_path.exists() {
            tracing::debug!("loading global config {}", global_path.display());
            config.merge(Config::load_or_default(global_path));
        }
    }

    if project_path.exists() {
        tracing::debug!("loading project config {}", project_path.display());
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Get the global umbrella config directory (~/.umbrella).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".umbrella"))
}

/// Get the global config path (~/.umbrella/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.umbrella/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".umbrella").join("config.toml")
}
