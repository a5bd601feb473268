//! Generation plan.
//!
//! A GenerationPlan lists every file a generation would write, with its
//! full contents, before anything touches the disk. Modules are rendered
//! in parallel but the plan keeps manifest order.

use std::path::PathBuf;

use anyhow::{bail, Result};
use rayon::prelude::*;
use serde::Serialize;

use crate::builder::export::ExportBlock;
use crate::builder::fingerprint::FileFingerprint;
use crate::builder::modulemap::ModuleMap;
use crate::builder::umbrella::UmbrellaHeader;
use crate::builder::version_source::VersionSource;
use crate::core::consumer::{Consumer, Platform};
use crate::core::manifest::ModuleManifest;
use crate::core::workspace::{SettingsOverride, Workspace};
use crate::util::diagnostic::suggestions;
use crate::util::hash::Fingerprint;

/// Kind of generated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    /// `<Name>-umbrella.h`
    Umbrella,
    /// `<Name>.modulemap`
    ModuleMap,
    /// `<Name>_vers.c`
    VersionSource,
}

/// A file the plan will write.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedFile {
    pub kind: FileKind,
    pub path: PathBuf,
    #[serde(skip)]
    pub contents: String,
    /// SHA-256 of `contents`
    pub hash: String,
}

impl PlannedFile {
    fn new(kind: FileKind, path: PathBuf, contents: String) -> Self {
        let hash = FileFingerprint::of_contents(&path, &contents).hash;
        PlannedFile {
            kind,
            path,
            contents,
            hash,
        }
    }

    pub fn fingerprint(&self) -> FileFingerprint {
        FileFingerprint {
            path: self.path.clone(),
            hash: self.hash.clone(),
        }
    }
}

/// Everything generated for one module.
#[derive(Debug, Clone, Serialize)]
pub struct ModulePlan {
    pub name: String,
    pub symbol_prefix: String,
    pub version: String,
    pub consumer: Consumer,
    pub platform: Platform,
    pub headers: Vec<String>,
    pub files: Vec<PlannedFile>,
}

/// The complete generation plan.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationPlan {
    pub output_dir: PathBuf,
    pub modules: Vec<ModulePlan>,
}

impl GenerationPlan {
    /// Plan generation for `selected` modules (all when empty).
    pub fn new(ws: &Workspace, selected: &[String], cli: &SettingsOverride) -> Result<Self> {
        let manifest = ws.manifest();

        for name in selected {
            if manifest.module(name).is_none() {
                bail!(
                    "module `{}` is not declared in {}\n{}",
                    name,
                    ws.manifest_path().display(),
                    suggestions::MODULE_NOT_FOUND
                );
            }
        }

        let modules: Vec<&ModuleManifest> = manifest
            .modules
            .iter()
            .filter(|m| selected.is_empty() || selected.iter().any(|s| s == m.name().as_str()))
            .collect();

        let modules = modules
            .par_iter()
            .map(|module| plan_module(ws, module, cli))
            .collect::<Result<Vec<_>>>()?;

        Ok(GenerationPlan {
            output_dir: ws.output_dir().to_path_buf(),
            modules,
        })
    }

    /// All planned files, module by module.
    pub fn files(&self) -> impl Iterator<Item = &PlannedFile> {
        self.modules.iter().flat_map(|m| m.files.iter())
    }

    /// A single hash over every planned path and content.
    pub fn fingerprint(&self) -> String {
        let mut fp = Fingerprint::new();
        for file in self.files() {
            fp.update_str(&file.path.to_string_lossy())
                .update_str(&file.hash);
        }
        fp.finish_short()
    }
}

fn plan_module(
    ws: &Workspace,
    module: &ModuleManifest,
    cli: &SettingsOverride,
) -> Result<ModulePlan> {
    let settings = ws.settings_for(module, cli);
    let dir = ws.module_dir(module);
    let name = module.name();

    tracing::debug!(
        "planning {} (consumer: {}, platform: {})",
        name,
        settings.consumer,
        settings.platform
    );

    let block = ExportBlock::new(settings.consumer, settings.platform);
    let umbrella = UmbrellaHeader::for_module(module, block)?;

    let mut files = vec![PlannedFile::new(
        FileKind::Umbrella,
        dir.join(name.umbrella_file_name()),
        umbrella.render(),
    )];

    if settings.modulemap {
        files.push(PlannedFile::new(
            FileKind::ModuleMap,
            dir.join(name.modulemap_file_name()),
            ModuleMap::new(name.clone(), module.framework).render(),
        ));
    }

    if settings.version_source {
        files.push(PlannedFile::new(
            FileKind::VersionSource,
            dir.join(name.version_source_file_name()),
            VersionSource::new(name.clone(), module.version().clone()).render(),
        ));
    }

    Ok(ModulePlan {
        name: name.as_str().to_string(),
        symbol_prefix: name.c_identifier().to_string(),
        version: module.version().as_str().to_string(),
        consumer: settings.consumer,
        platform: settings.platform,
        headers: umbrella.headers().to_vec(),
        files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::manifest::Manifest;
    use crate::util::config::Config;

    fn workspace(toml: &str) -> Workspace {
        let manifest = Manifest::parse(toml, PathBuf::from("/proj")).unwrap();
        Workspace::from_parts(manifest, PathBuf::from("/proj/Umbrella.toml"), Config::default())
    }

    const MANIFEST: &str = r#"
[[module]]
name = "RNWorklets"
version = "0.5.1"
headers = ["Tools/Defs.h", "Public/AsyncQueue.h"]
version_source = true

[[module]]
name = "React-RCTFBReactNativeSpec"
modulemap = false
headers = ["FBReactNativeSpecJSI.h"]
"#;

    #[test]
    fn test_plan_all_modules() {
        let ws = workspace(MANIFEST);
        let plan = GenerationPlan::new(&ws, &[], &SettingsOverride::default()).unwrap();

        assert_eq!(plan.modules.len(), 2);
        assert_eq!(plan.modules[0].name, "RNWorklets");
        assert_eq!(plan.modules[1].symbol_prefix, "React_RCTFBReactNativeSpec");

        let kinds: Vec<FileKind> = plan.modules[0].files.iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            [FileKind::Umbrella, FileKind::ModuleMap, FileKind::VersionSource]
        );
        assert_eq!(
            plan.modules[0].files[0].path,
            PathBuf::from("/proj/Target Support Files/RNWorklets/RNWorklets-umbrella.h")
        );

        let kinds: Vec<FileKind> = plan.modules[1].files.iter().map(|f| f.kind).collect();
        assert_eq!(kinds, [FileKind::Umbrella]);
    }

    #[test]
    fn test_plan_selected_module() {
        let ws = workspace(MANIFEST);
        let selected = vec!["React-RCTFBReactNativeSpec".to_string()];
        let plan = GenerationPlan::new(&ws, &selected, &SettingsOverride::default()).unwrap();
        assert_eq!(plan.modules.len(), 1);
        assert_eq!(plan.modules[0].name, "React-RCTFBReactNativeSpec");
    }

    #[test]
    fn test_plan_unknown_module() {
        let ws = workspace(MANIFEST);
        let selected = vec!["Nope".to_string()];
        let err = GenerationPlan::new(&ws, &selected, &SettingsOverride::default()).unwrap_err();
        assert!(err.to_string().contains("module `Nope` is not declared"));
    }

    #[test]
    fn test_plan_is_deterministic() {
        let ws = workspace(MANIFEST);
        let a = GenerationPlan::new(&ws, &[], &SettingsOverride::default()).unwrap();
        let b = GenerationPlan::new(&ws, &[], &SettingsOverride::default()).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());

        let plain = SettingsOverride {
            consumer: Some(Consumer::Plain),
            ..Default::default()
        };
        let c = GenerationPlan::new(&ws, &[], &plain).unwrap();
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn test_plan_serializes_without_contents() {
        let ws = workspace(MANIFEST);
        let plan = GenerationPlan::new(&ws, &[], &SettingsOverride::default()).unwrap();
        let json = serde_json::to_value(&plan).unwrap();

        let file = &json["modules"][0]["files"][0];
        assert_eq!(file["kind"], "umbrella");
        assert!(file.get("contents").is_none());
        assert_eq!(json["modules"][0]["consumer"], "ui-framework");
    }
}
