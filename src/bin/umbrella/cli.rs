//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Umbrella - generates umbrella headers, module maps and version symbols
#[derive(Parser)]
#[command(name = "umbrella")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to Umbrella.toml (defaults to searching upward from the current directory)
    #[arg(long, global = true, env = "UMBRELLA_MANIFEST")]
    pub manifest_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate umbrella headers for the modules in Umbrella.toml
    Generate(GenerateArgs),

    /// Check that every listed header exists
    Check(CheckArgs),

    /// Create an Umbrella.toml in a directory
    Init(InitArgs),

    /// Add headers to a module in Umbrella.toml
    Add(AddArgs),

    /// Show how a module's umbrella header resolves
    Show(ShowArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Modules to generate (defaults to all)
    #[arg(long = "module", short = 'm')]
    pub modules: Vec<String>,

    /// Consumer toolchain: ui-framework or plain
    #[arg(long)]
    pub consumer: Option<String>,

    /// Target platform: ios, tvos, visionos, watchos, macos
    #[arg(long)]
    pub platform: Option<String>,

    /// Also emit `<Name>_vers.c` defining the version symbols
    #[arg(long)]
    pub version_source: bool,

    /// Skip module maps
    #[arg(long)]
    pub no_modulemap: bool,

    /// Output directory (overrides `output_dir` in Umbrella.toml)
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Print the generation plan as JSON and write nothing
    #[arg(long)]
    pub plan: bool,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Modules to check (defaults to all)
    #[arg(long = "module", short = 'm')]
    pub modules: Vec<String>,
}

#[derive(Args)]
pub struct InitArgs {
    /// Name of the first module (defaults to the directory name)
    #[arg(long)]
    pub module: Option<String>,

    /// Directory to initialize (defaults to current directory)
    pub path: Option<PathBuf>,
}

#[derive(Args)]
pub struct AddArgs {
    /// Module to add headers to; created if missing
    pub module: String,

    /// Header paths, relative to the module's header root
    #[arg(required = true)]
    pub headers: Vec<String>,

    /// Version for a newly created module
    #[arg(long)]
    pub version: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Module to show
    pub module: String,

    /// Language of the including translation unit: c, c++, objc, objc++
    #[arg(long, default_value = "c")]
    pub lang: String,

    /// Consumer toolchain override: ui-framework or plain
    #[arg(long)]
    pub consumer: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
