use anyhow::Result;
use branchpack::cli::{AppContext, Cli, Commands};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Build a context once, pass everywhere
    let ctx = AppContext {
        quiet: cli.quiet,
        no_color: cli.no_color,
        dry_run: cli.dry_run,
        verbose: cli.verbose,
    };

    init_tracing(ctx.verbose);
    if ctx.no_color {
        owo_colors::set_override(false);
    }

    match cli.command {
        Commands::Pack(args) => branchpack::pack_run(args, &ctx),
        Commands::Changes(args) => branchpack::changes_run(args, &ctx),
        Commands::Init(args) => branchpack::infra::config::init(args, &ctx),
        Commands::Completions(args) => branchpack::completion::run(args),
    }
}

/// Diagnostics go to stderr; RUST_LOG overrides the verbosity flag.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "branchpack=debug"
    } else {
        "branchpack=error"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
