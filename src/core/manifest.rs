//! Umbrella.toml manifest parsing and schema.
//!
//! A manifest lists one or more modules. Each module carries its name, an
//! ordered list of public headers and the version it exports:
//!
//! ```toml
//! [settings]
//! output_dir = "Target Support Files"
//!
//! [[module]]
//! name = "RNWorklets"
//! version = "0.5.1"
//! header_root = "Common/cpp/worklets"
//! headers = ["Tools/Defs.h", "Registries/EventHandlerRegistry.h"]
//! ```

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::consumer::{Consumer, Platform};
use crate::core::error::GenerateError;
use crate::core::module_name::ModuleName;
use crate::core::version::{VersionRecord, DEFAULT_VERSION, DEFAULT_VERSION_NUMBER};
use crate::util::diagnostic::ManifestParseError;
use crate::util::fs;

/// Default directory (relative to the manifest) that receives generated files.
pub const DEFAULT_OUTPUT_DIR: &str = "Target Support Files";

/// Manifest-wide settings from the `[settings]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Output directory, relative to the manifest
    pub output_dir: Option<PathBuf>,

    /// Consumer toolchain for every module without its own setting
    pub consumer: Option<Consumer>,

    /// Target platform for every module without its own setting
    pub platform: Option<Platform>,

    /// Emit module maps
    pub modulemap: Option<bool>,

    /// Emit version sources
    pub version_source: Option<bool>,
}

/// The parsed Umbrella.toml manifest.
#[derive(Debug, Clone)]
pub struct Manifest {
    /// Manifest-wide settings
    pub settings: Settings,

    /// Modules in manifest order
    pub modules: Vec<ModuleManifest>,

    /// The directory containing this manifest
    pub manifest_dir: PathBuf,
}

/// One module: a name, its ordered headers and its version.
#[derive(Debug, Clone)]
pub struct ModuleManifest {
    name: ModuleName,
    version: VersionRecord,
    headers: Vec<String>,
    header_globs: Vec<String>,
    header_root: PathBuf,

    /// Build as a framework (`framework module` in the module map)
    pub framework: bool,

    /// Per-module overrides of the manifest settings
    pub consumer: Option<Consumer>,
    pub platform: Option<Platform>,
    pub modulemap: Option<bool>,
    pub version_source: Option<bool>,
}

impl ModuleManifest {
    /// Create a module from a name and an ordered header list.
    ///
    /// The header root defaults to the current directory and the version
    /// record to [`VersionRecord::default`].
    pub fn new<I, S>(name: &str, headers: I) -> Result<Self, GenerateError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = ModuleName::new(name)?;
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        for header in &headers {
            validate_header_path(&name, header)?;
        }

        Ok(ModuleManifest {
            name,
            version: VersionRecord::default(),
            headers,
            header_globs: Vec::new(),
            header_root: PathBuf::from("."),
            framework: true,
            consumer: None,
            platform: None,
            modulemap: None,
            version_source: None,
        })
    }

    /// Replace the version record.
    pub fn with_version(mut self, version: VersionRecord) -> Self {
        self.version = version;
        self
    }

    /// Set the directory headers are relative to.
    pub fn with_header_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.header_root = root.into();
        self
    }

    /// Add glob patterns resolved against the header root.
    pub fn with_header_globs(mut self, globs: Vec<String>) -> Self {
        self.header_globs = globs;
        self
    }

    pub fn name(&self) -> &ModuleName {
        &self.name
    }

    pub fn version(&self) -> &VersionRecord {
        &self.version
    }

    /// Explicitly listed headers, in manifest order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn header_root(&self) -> &Path {
        &self.header_root
    }

    /// All headers that the umbrella re-exports.
    ///
    /// Explicit headers come first in manifest order, duplicates included.
    /// Glob matches follow, sorted, skipping paths already listed.
    /// Nothing here checks that explicit headers exist. Glob matches go
    /// through the same path checks as explicit headers.
    pub fn resolve_headers(&self) -> Result<Vec<String>> {
        let mut headers = self.headers.clone();
        if self.header_globs.is_empty() {
            return Ok(headers);
        }

        for pattern in &self.header_globs {
            validate_header_glob(&self.name, pattern)?;
        }

        let mut seen: HashSet<String> = headers.iter().cloned().collect();
        let matches = fs::glob_files(&self.header_root, &self.header_globs)?;
        for path in matches {
            let rel = fs::relative_path(&self.header_root, &path);
            let rel = fs::to_import_path(&rel);
            validate_header_path(&self.name, &rel)?;
            if seen.insert(rel.clone()) {
                tracing::debug!("{}: discovered header {}", self.name, rel);
                headers.push(rel);
            }
        }

        Ok(headers)
    }
}

/// Reject header paths that cannot be written into an `#import "..."` line.
pub fn validate_header_path(module: &ModuleName, header: &str) -> Result<(), GenerateError> {
    if header.trim().is_empty() {
        return Err(GenerateError::invalid_manifest(format!(
            "module `{}` lists an empty header path",
            module
        )));
    }

    if header.starts_with('/') || Path::new(header).is_absolute() {
        return Err(GenerateError::invalid_manifest(format!(
            "header `{}` of module `{}` must be relative",
            header, module
        )));
    }

    if header
        .chars()
        .any(|c| matches!(c, '"' | '<' | '>') || c.is_control())
    {
        return Err(GenerateError::invalid_manifest(format!(
            "header `{}` of module `{}` contains characters that cannot be imported",
            header.escape_debug(),
            module
        )));
    }

    Ok(())
}

/// Header globs are resolved against the header root and must stay relative.
pub fn validate_header_glob(module: &ModuleName, pattern: &str) -> Result<(), GenerateError> {
    if pattern.trim().is_empty() {
        return Err(GenerateError::invalid_manifest(format!(
            "module `{}` lists an empty header glob",
            module
        )));
    }

    if pattern.starts_with('/') || Path::new(pattern).is_absolute() {
        return Err(GenerateError::invalid_manifest(format!(
            "header glob `{}` of module `{}` must be relative",
            pattern, module
        )));
    }

    Ok(())
}

/// Raw manifest as deserialized from TOML.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawManifest {
    #[serde(default)]
    settings: Settings,

    #[serde(default)]
    module: Vec<RawModule>,
}

/// Raw module from TOML (before validation).
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawModule {
    name: String,

    #[serde(default)]
    version: Option<String>,

    #[serde(default)]
    version_number: Option<f64>,

    #[serde(default)]
    header_root: Option<PathBuf>,

    #[serde(default)]
    headers: Vec<String>,

    #[serde(default)]
    header_globs: Vec<String>,

    #[serde(default)]
    framework: Option<bool>,

    #[serde(default)]
    consumer: Option<Consumer>,

    #[serde(default)]
    platform: Option<Platform>,

    #[serde(default)]
    modulemap: Option<bool>,

    #[serde(default)]
    version_source: Option<bool>,
}

impl Manifest {
    /// Load a manifest from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let manifest_dir = path.parent().unwrap_or(Path::new(".")).to_path_buf();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| MANIFEST_NAME.to_string());

        Self::parse_named(&name, &contents, manifest_dir)
            .with_context(|| format!("failed to load manifest: {}", path.display()))
    }

    /// Parse a manifest from TOML text.
    pub fn parse(contents: &str, manifest_dir: PathBuf) -> Result<Self> {
        Self::parse_named(MANIFEST_NAME, contents, manifest_dir)
    }

    fn parse_named(name: &str, contents: &str, manifest_dir: PathBuf) -> Result<Self> {
        let raw: RawManifest = toml::from_str(contents)
            .map_err(|e| ManifestParseError::from_toml(name, contents, &e))?;

        if raw.module.is_empty() {
            return Err(GenerateError::invalid_manifest("manifest declares no modules").into());
        }

        let mut seen = HashSet::new();
        let mut prefixes: HashMap<String, ModuleName> = HashMap::new();
        let mut modules = Vec::with_capacity(raw.module.len());
        for raw_module in raw.module {
            let module = Self::validate_module(raw_module, &manifest_dir)?;
            if !seen.insert(module.name().as_str().to_string()) {
                return Err(GenerateError::invalid_manifest(format!(
                    "module `{}` is declared more than once",
                    module.name()
                ))
                .into());
            }

            // `A-B` and `A_B` would export the same symbols.
            let prefix = module.name().c_identifier().to_string();
            if let Some(other) = prefixes.get(&prefix) {
                return Err(GenerateError::invalid_manifest(format!(
                    "module `{}` and `{}` map to the same symbol prefix `{}`",
                    module.name(),
                    other,
                    prefix
                ))
                .into());
            }
            prefixes.insert(prefix, module.name().clone());

            modules.push(module);
        }

        Ok(Manifest {
            settings: raw.settings,
            modules,
            manifest_dir,
        })
    }

    fn validate_module(raw: RawModule, manifest_dir: &Path) -> Result<ModuleManifest, GenerateError> {
        let version = VersionRecord::new(
            raw.version_number.unwrap_or(DEFAULT_VERSION_NUMBER),
            raw.version.unwrap_or_else(|| DEFAULT_VERSION.to_string()),
        )?;

        let header_root = match raw.header_root {
            Some(root) => manifest_dir.join(root),
            None => manifest_dir.to_path_buf(),
        };

        let name = ModuleName::new(raw.name.as_str())?;
        for pattern in &raw.header_globs {
            validate_header_glob(&name, pattern)?;
        }

        let mut module = ModuleManifest::new(&raw.name, raw.headers)?
            .with_version(version)
            .with_header_root(header_root)
            .with_header_globs(raw.header_globs);

        module.framework = raw.framework.unwrap_or(true);
        module.consumer = raw.consumer;
        module.platform = raw.platform;
        module.modulemap = raw.modulemap;
        module.version_source = raw.version_source;

        Ok(module)
    }

    /// Look up a module by name.
    pub fn module(&self, name: &str) -> Option<&ModuleManifest> {
        self.modules.iter().find(|m| m.name().as_str() == name)
    }
}

/// Canonical manifest file name.
pub const MANIFEST_NAME: &str = "Umbrella.toml";

/// Generate a starter manifest for one module.
pub fn generate_manifest(module: &str) -> String {
    format!(
        r#"[settings]
output_dir = "{output_dir}"
consumer = "ui-framework"
platform = "ios"

[[module]]
name = "{module}"
version = "{version}"
header_root = "include/{module}"
headers = []
"#,
        output_dir = DEFAULT_OUTPUT_DIR,
        module = module,
        version = DEFAULT_VERSION,
    )
}
