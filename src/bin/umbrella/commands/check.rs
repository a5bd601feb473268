//! `umbrella check` command

use anyhow::{bail, Result};

use crate::cli::CheckArgs;
use crate::GlobalOptions;
use umbrella::core::Workspace;
use umbrella::ops::check::check;
use umbrella::util::diagnostic::emit;
use umbrella::util::{GlobalContext, Shell, Status};

pub fn execute(args: CheckArgs, global: &GlobalOptions) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let shell = Shell::new(global.color);
    let manifest_path = ctx.manifest_path(global.manifest_path.as_deref())?;
    let ws = Workspace::new(&manifest_path, &ctx)?;

    let report = check(&ws, &args.modules)?;

    for warning in &report.warnings {
        emit(warning, shell.use_color());
    }
    for error in &report.errors {
        emit(&error.to_diagnostic(), shell.use_color());
    }

    if !report.is_ok() {
        bail!("{} header(s) missing", report.errors.len());
    }

    shell.status(
        Status::Checked,
        format!("{} header(s), all present", report.checked),
    );
    Ok(())
}
