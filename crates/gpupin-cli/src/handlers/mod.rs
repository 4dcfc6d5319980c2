//! Command handlers.
//!
//! Handlers follow the pattern:
//! - Signature: `pub fn execute(ctx: &CliContext, ...) -> Result<()>`, or
//!   `&CliPaths` for commands that must not load settings
//! - Thin wrappers that call core services and format output
//! - No probing of their own; hardware access goes through the context's ports

pub mod check_offload;
pub mod config;
pub mod env;
pub mod gpus;
pub mod paths;

#[cfg(test)]
pub(crate) mod test_support;
