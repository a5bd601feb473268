//! `umbrella generate` command

use anyhow::{Context, Result};

use crate::cli::GenerateArgs;
use crate::GlobalOptions;
use umbrella::core::{Consumer, Platform, SettingsOverride, Workspace};
use umbrella::ops::generate::{generate, GenerateOptions};
use umbrella::util::{GlobalContext, Shell, Status};

/// Turn command-line flags into settings overrides.
pub fn overrides_from_args(args: &GenerateArgs) -> Result<SettingsOverride> {
    let consumer = args
        .consumer
        .as_deref()
        .map(str::parse::<Consumer>)
        .transpose()?;
    let platform = args
        .platform
        .as_deref()
        .map(str::parse::<Platform>)
        .transpose()?;

    Ok(SettingsOverride {
        consumer,
        platform,
        modulemap: args.no_modulemap.then_some(false),
        version_source: args.version_source.then_some(true),
    })
}

pub fn execute(args: GenerateArgs, global: &GlobalOptions) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let manifest_path = ctx.manifest_path(global.manifest_path.as_deref())?;

    let mut ws = Workspace::new(&manifest_path, &ctx)?;
    if let Some(ref out) = args.out {
        ws = ws.with_output_dir(ctx.cwd().join(out));
    }

    let opts = GenerateOptions {
        modules: args.modules.clone(),
        overrides: overrides_from_args(&args)?,
        dry_run: args.plan,
    };

    let result = generate(&ws, &opts)?;

    if args.plan {
        let json = serde_json::to_string_pretty(&result.plan)
            .context("failed to serialize generation plan")?;
        println!("{}", json);
        return Ok(());
    }

    let shell = Shell::new(global.color);
    for path in &result.written {
        shell.status(Status::Generated, path.display());
    }
    for path in &result.unchanged {
        shell.status(Status::Fresh, path.display());
    }
    shell.status(
        Status::Finished,
        format!(
            "{} module(s), {} file(s) written, {} unchanged",
            result.plan.modules.len(),
            result.written.len(),
            result.unchanged.len()
        ),
    );

    Ok(())
}
