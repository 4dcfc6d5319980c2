//! Env command handler.
//!
//! Resolves the full launch environment. A missing GPU aborts here, before
//! anything could be launched with a half-applied selection.

use anyhow::Result;
use gpupin_core::{EnvMap, GpuSelection, LaunchEnv, Renderer, Settings};
use tracing::warn;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{env_json, env_lines};

/// Settings with per-invocation overrides applied.
pub fn effective_settings(
    settings: &Settings,
    gpu: Option<GpuSelection>,
    renderer: Option<Renderer>,
) -> Settings {
    let mut effective = settings.clone();
    if let Some(gpu) = gpu {
        effective.gpu = gpu;
    }
    if let Some(renderer) = renderer {
        effective.renderer = renderer;
    }
    effective
}

/// Resolve the launch environment for the given overrides.
pub fn resolve(
    ctx: &CliContext,
    gpu: Option<GpuSelection>,
    renderer: Option<Renderer>,
) -> Result<EnvMap, CliError> {
    let settings = effective_settings(ctx.settings(), gpu, renderer);
    LaunchEnv::resolve(&settings, &ctx.dirs, ctx.resolver()).map_err(|e| {
        warn!(gpu = %settings.gpu, "GPU resolution failed: {e}");
        CliError::from(e)
    })
}

/// Execute the env command.
pub fn execute(
    ctx: &CliContext,
    gpu: Option<GpuSelection>,
    renderer: Option<Renderer>,
    json: bool,
) -> Result<()> {
    let env = resolve(ctx, gpu, renderer)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&env_json(&env))?);
    } else {
        for line in env_lines(&env) {
            println!("{line}");
        }
    }
    Ok(())
}
