//! Implementation of `umbrella show`.
//!
//! Prints what a module's umbrella header resolves to for a given
//! consumer language, without writing anything.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::builder::export::ExportBlock;
use crate::builder::umbrella::UmbrellaHeader;
use crate::core::consumer::{Consumer, Language, Platform};
use crate::core::workspace::{SettingsOverride, Workspace};
use crate::util::diagnostic::suggestions;

/// Options for `umbrella show`.
#[derive(Debug, Clone)]
pub struct ShowOptions {
    pub module: String,
    pub language: Language,
    pub overrides: SettingsOverride,
}

/// Resolved view of one module.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleReport {
    pub name: String,
    pub symbol_prefix: String,
    pub version: String,
    pub version_number: f64,
    pub consumer: Consumer,
    pub platform: Platform,
    pub language: Language,
    /// What `FOUNDATION_EXPORT` expands to for `language`
    pub export_expansion: &'static str,
    /// Version declarations after macro expansion
    pub declarations: Vec<String>,
    pub headers: Vec<String>,
    /// The umbrella header as it would be generated
    pub umbrella: String,
}

pub fn show_module(ws: &Workspace, opts: &ShowOptions) -> Result<ModuleReport> {
    let module = ws
        .manifest()
        .module(&opts.module)
        .with_context(|| {
            format!(
                "module `{}` is not declared in {}\n{}",
                opts.module,
                ws.manifest_path().display(),
                suggestions::MODULE_NOT_FOUND
            )
        })?;

    let settings = ws.settings_for(module, &opts.overrides);
    let block = ExportBlock::new(settings.consumer, settings.platform);
    let umbrella = UmbrellaHeader::for_module(module, block)?;

    Ok(ModuleReport {
        name: umbrella.module().as_str().to_string(),
        symbol_prefix: umbrella.module().c_identifier().to_string(),
        version: module.version().as_str().to_string(),
        version_number: module.version().number(),
        consumer: settings.consumer,
        platform: settings.platform,
        language: opts.language,
        export_expansion: block.expand(opts.language),
        declarations: umbrella.expanded_declarations(opts.language).to_vec(),
        headers: umbrella.headers().to_vec(),
        umbrella: umbrella.render(),
    })
}
