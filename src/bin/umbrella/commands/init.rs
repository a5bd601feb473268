//! `umbrella init` command

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::cli::InitArgs;
use crate::GlobalOptions;
use umbrella::ops::umbrella_new::init_manifest;
use umbrella::util::{Shell, Status};

/// Module name from the arguments or the directory name.
pub fn determine_module_name(module: &Option<String>, path: &Path) -> String {
    module.clone().unwrap_or_else(|| {
        path.canonicalize()
            .ok()
            .as_deref()
            .and_then(Path::file_name)
            .and_then(|n| n.to_str())
            .unwrap_or("Module")
            .to_string()
    })
}

pub fn execute(args: InitArgs, global: &GlobalOptions) -> Result<()> {
    let path = args.path.unwrap_or_else(|| PathBuf::from("."));
    let module = determine_module_name(&args.module, &path);

    let manifest_path = init_manifest(&path, &module)?;
    Shell::new(global.color).status(
        Status::Created,
        format!("{} with module `{}`", manifest_path.display(), module),
    );

    Ok(())
}
