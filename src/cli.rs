use camino::Utf8PathBuf;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shared application context for global flags
#[derive(Clone, Debug)]
pub struct AppContext {
    pub quiet: bool,    // global --quiet
    pub no_color: bool, // global --no-color
    pub dry_run: bool,  // global --dry-run
    pub verbose: bool,  // global --verbose
}

#[derive(Parser)]
#[command(name = "branchpack")]
#[command(about = "Assemble a minimal deploy package from the files changed on a branch")]
#[command(version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Show what would be done without executing
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Verbose diagnostics on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Assemble changed files into a deployable output directory
    Pack(PackArgs),

    /// Show the fork point and the files changed since it
    Changes(ChangesArgs),

    /// Initialize a branchpack.toml config file
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Parser)]
pub struct PackArgs {
    /// Output directory to copy modified changes into
    #[arg(short, long)]
    pub directory: Option<Utf8PathBuf>,

    /// Current commit/branch to compare against
    #[arg(long)]
    pub current: Option<String>,

    /// Parent commit/branch to compare against
    #[arg(long)]
    pub parent: Option<String>,
}

#[derive(Parser)]
pub struct ChangesArgs {
    /// Current commit/branch to compare against
    #[arg(long)]
    pub current: Option<String>,

    /// Parent commit/branch to compare against
    #[arg(long)]
    pub parent: Option<String>,
}

#[derive(Parser)]
pub struct InitArgs {
    /// Directory to initialize config in
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing config file
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Parser)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,

    /// Output directory; if omitted and --stdout not set, prints error
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Print completion script to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,
}
