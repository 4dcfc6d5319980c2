//! Command-line adapter for gpupin.
//!
//! `main.rs` parses arguments, initialises logging, resolves [`CliPaths`] and
//! calls [`bootstrap`] for commands that need settings;
//! handlers receive the composed [`CliContext`] and only format output.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by the binary target only
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod config_commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, CliPaths, bootstrap};
pub use commands::Commands;
pub use config_commands::ConfigCommand;
pub use error::CliError;
pub use parser::Cli;
