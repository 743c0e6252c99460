//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Load configuration
    let config = Config::load()?;

    // Determine output format
    let output_format = cli.output.or(config.output_format).unwrap_or_default();

    // Base URL from CLI/env, then config
    let api_url = cli
        .api_url
        .or_else(|| config.api_base_url.clone())
        .unwrap_or_else(|| doomsday::DEFAULT_BASE_URL.to_string());

    // Create context for commands
    let ctx = commands::Context {
        api_url,
        output_format,
        verbose: cli.verbose,
        config,
    };

    // Dispatch to appropriate command
    match cli.command {
        Commands::Audit(args) => commands::audit::execute(ctx, args).await,
        Commands::Catalog(args) => commands::catalog::execute(ctx, args).await,
        Commands::Probe(args) => commands::probe::execute(ctx, args).await,
        Commands::Config(args) => commands::config::execute(ctx, args),
    }
}

/// Log to stderr so stdout only carries the report.
fn init_tracing(verbose: bool) {
    let default = if verbose { "doomsday=debug" } else { "doomsday=info" };

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
