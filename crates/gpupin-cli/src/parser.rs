//! Main CLI parser and top-level argument handling.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Pick the GPU a launch renders on and print the environment that forces it.
#[derive(Parser)]
#[command(name = "gpupin")]
#[command(about = "Resolve GPU selection and PRIME offload environment for launches")]
#[command(version)]
pub struct Cli {
    /// Use this configuration file instead of the default location
    #[arg(long = "config", global = true, env = "GPUPIN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
