//! `umbrella add` command

use anyhow::Result;

use crate::cli::AddArgs;
use crate::GlobalOptions;
use umbrella::ops::umbrella_add::{add_headers, AddOptions};
use umbrella::util::{GlobalContext, Shell, Status};

pub fn execute(args: AddArgs, global: &GlobalOptions) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let manifest_path = ctx.manifest_path(global.manifest_path.as_deref())?;

    let opts = AddOptions {
        module: args.module.clone(),
        headers: args.headers,
        version: args.version,
    };

    let result = add_headers(&manifest_path, &opts)?;

    let shell = Shell::new(global.color);
    if result.created_module {
        shell.status(Status::Created, format!("module `{}`", args.module));
    }
    for header in &result.added {
        shell.status(Status::Added, format!("{} to `{}`", header, args.module));
    }
    for header in &result.skipped {
        shell.status(Status::Skipped, format!("{} (already listed)", header));
    }

    Ok(())
}
