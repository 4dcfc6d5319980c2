//! Config command handler.
//!
//! Runs from [`CliPaths`] alone: the file is only parsed by `show`, so
//! `path` and `init --force` keep working when it is broken.

use std::path::Path;

use anyhow::{Result, bail};
use gpupin_core::Settings;
use gpupin_core::settings::write_template;

use crate::bootstrap::CliPaths;
use crate::config_commands::ConfigCommand;

/// Execute a config subcommand.
pub fn execute(paths: &CliPaths, command: &ConfigCommand) -> Result<()> {
    let config_path = paths.config_path.as_path();
    match command {
        ConfigCommand::Path => {
            println!("{}", config_path.display());
        }
        ConfigCommand::Show => {
            print!("{}", Settings::load_or_init(config_path)?.to_toml()?);
        }
        ConfigCommand::Init { force } => {
            init(config_path, *force)?;
            println!("Wrote {}", config_path.display());
        }
    }
    Ok(())
}

/// Write the template, refusing to replace an existing file unless forced.
pub fn init(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }
    write_template(config_path)?;
    Ok(())
}
