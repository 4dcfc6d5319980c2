//! Configuration management subcommands.

use clap::Subcommand;

/// Configuration file commands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the configuration file path
    Path,
    /// Print the effective settings as TOML
    Show,
    /// Write the commented template
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}
