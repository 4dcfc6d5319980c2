//! CLI entry point.
//!
//! Parses arguments, initialises logging on stderr (stdout carries the
//! environment for scripts), bootstraps the context and dispatches.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use gpupin_cli::{Cli, CliConfig, CliError, CliPaths, Commands, bootstrap, handlers};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            let code = CliError::exit_code_for(&e);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn init_logging(verbose: bool) {
    // RUST_LOG wins over --verbose
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    let paths = CliPaths::resolve(CliConfig::with_config_path(cli.config))?;

    // Only commands that need settings load them, so `paths` and `config`
    // keep working while the file is broken
    match command {
        Commands::Paths => handlers::paths::execute(&paths),
        Commands::Config { command } => handlers::config::execute(&paths, &command),
        Commands::Gpus { json } => handlers::gpus::execute(&bootstrap(paths)?, json),
        Commands::Env {
            gpu,
            renderer,
            json,
        } => handlers::env::execute(&bootstrap(paths)?, gpu, renderer, json),
        Commands::CheckOffload { renderer } => {
            handlers::check_offload::execute(&bootstrap(paths)?, renderer)
        }
    }
}
