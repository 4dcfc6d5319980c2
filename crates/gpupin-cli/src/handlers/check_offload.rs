//! Check-offload command handler.

use anyhow::Result;
use gpupin_core::Renderer;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Whether PRIME offload applies for `renderer` (or the configured one).
pub fn offload_available(ctx: &CliContext, renderer: Option<Renderer>) -> Result<bool, CliError> {
    let settings = ctx.settings();
    let renderer = renderer.unwrap_or(settings.renderer);
    ctx.eligibility
        .check_offload(&ctx.inventory.gpus(), renderer.is_vulkan(settings.dxvk))
        .map_err(|e| CliError::Probe(e.to_string()))
}

/// Execute the check-offload command.
pub fn execute(ctx: &CliContext, renderer: Option<Renderer>) -> Result<()> {
    let settings = ctx.settings();
    let renderer = renderer.unwrap_or(settings.renderer);
    let offload_capable_api = renderer.is_vulkan(settings.dxvk);

    let allowed = offload_available(ctx, Some(renderer))?;

    println!("GPUs detected: {}", ctx.inventory.gpus().len());
    println!(
        "Renderer: {renderer} ({})",
        if offload_capable_api { "Vulkan" } else { "legacy" }
    );
    if allowed {
        println!("PRIME offload: available");
    } else {
        println!("PRIME offload: not available (prime:<index> falls back to the default GPU)");
    }
    Ok(())
}
