//! `umbrella show` command

use anyhow::{Context, Result};

use crate::cli::ShowArgs;
use crate::GlobalOptions;
use umbrella::core::{Consumer, Language, SettingsOverride, Workspace};
use umbrella::ops::show::{show_module, ShowOptions};
use umbrella::util::GlobalContext;

pub fn execute(args: ShowArgs, global: &GlobalOptions) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let manifest_path = ctx.manifest_path(global.manifest_path.as_deref())?;
    let ws = Workspace::new(&manifest_path, &ctx)?;

    let language: Language = args.lang.parse()?;
    let consumer = args
        .consumer
        .as_deref()
        .map(str::parse::<Consumer>)
        .transpose()?;

    let opts = ShowOptions {
        module: args.module,
        language,
        overrides: SettingsOverride {
            consumer,
            ..Default::default()
        },
    };

    let report = show_module(&ws, &opts)?;

    if args.json {
        let json =
            serde_json::to_string_pretty(&report).context("failed to serialize module report")?;
        println!("{}", json);
        return Ok(());
    }

    println!("module:    {}", report.name);
    println!("symbols:   {}VersionNumber, {}VersionString", report.symbol_prefix, report.symbol_prefix);
    println!("version:   {} ({})", report.version, report.version_number);
    println!("consumer:  {} ({})", report.consumer, report.platform);
    println!("export:    FOUNDATION_EXPORT -> {} [{}]", report.export_expansion, report.language);
    println!("headers:   {}", report.headers.len());
    for decl in &report.declarations {
        println!("  {}", decl);
    }
    println!();
    print!("{}", report.umbrella);

    Ok(())
}
