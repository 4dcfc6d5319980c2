//! Paths command handler.
//!
//! Displays all resolved directories in `key = value` format.

use anyhow::Result;

use crate::bootstrap::CliPaths;

/// Execute the paths command.
pub fn execute(paths: &CliPaths) -> Result<()> {
    println!("{}", paths.dirs);
    println!("config_file = {}", paths.config_path.display());
    Ok(())
}
