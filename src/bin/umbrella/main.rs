//! Umbrella CLI - umbrella header generator for native modules

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

/// Options shared by every command.
pub struct GlobalOptions {
    pub manifest_path: Option<PathBuf>,
    pub color: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("umbrella=debug")
    } else {
        EnvFilter::new("umbrella=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let global = GlobalOptions {
        manifest_path: cli.manifest_path,
        color: !cli.no_color,
    };

    match cli.command {
        Commands::Generate(args) => commands::generate::execute(args, &global),
        Commands::Check(args) => commands::check::execute(args, &global),
        Commands::Init(args) => commands::init::execute(args, &global),
        Commands::Add(args) => commands::add::execute(args, &global),
        Commands::Show(args) => commands::show::execute(args, &global),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
