//! Main commands enum.

use clap::Subcommand;
use gpupin_core::{GpuSelection, Renderer};

use crate::config_commands::ConfigCommand;

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// List detected GPUs and the index to use for each
    Gpus {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the launch environment with the selected GPU applied
    Env {
        /// GPU selection: "default", "<index>" or "prime:<index>"
        #[arg(long)]
        gpu: Option<GpuSelection>,
        /// Renderer override: D3D11, D3D10, D3D9, Vulkan or OpenGL
        #[arg(long)]
        renderer: Option<Renderer>,
        /// Print as a JSON object instead of KEY=VALUE lines
        #[arg(long)]
        json: bool,
    },

    /// Report whether PRIME render offload is usable on this machine
    CheckOffload {
        /// Renderer override: D3D11, D3D10, D3D9, Vulkan or OpenGL
        #[arg(long)]
        renderer: Option<Renderer>,
    },

    /// Show resolved paths for all gpupin directories
    Paths,

    /// Inspect or initialise the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}
