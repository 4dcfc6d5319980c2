//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together for
//! the CLI adapter:
//! - Directory layout (via gpupin-core)
//! - Settings file (via gpupin-core)
//! - DRM inventory and PRIME checker (via gpupin-runtime)
//!
//! Command handlers receive the composed `CliContext`.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use gpupin_core::ports::{GpuInventoryPort, OffloadEligibilityPort};
use gpupin_core::{Dirs, GpuResolver, Settings};
use gpupin_runtime::{CachedGpuInventory, PrimeEligibility, SysfsGpuInventory};
use tracing::debug;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Explicit configuration file, overriding `Dirs::config_file`.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Config reading settings from `path` when given.
    pub const fn with_config_path(config_path: Option<PathBuf>) -> Self {
        Self { config_path }
    }
}

/// Directory layout and configuration file location.
///
/// Resolving these never reads the configuration file, so commands that
/// repair or locate a broken file can run with this alone.
#[derive(Debug, Clone)]
pub struct CliPaths {
    /// Resolved directory layout.
    pub dirs: Dirs,
    /// Configuration file in use.
    pub config_path: PathBuf,
}

impl CliPaths {
    /// Resolve the layout and create its leaf directories.
    pub fn resolve(config: CliConfig) -> Result<Self> {
        let dirs = Dirs::resolve().context("Failed to resolve gpupin directories")?;
        dirs.ensure().context("Failed to create gpupin directories")?;

        let config_path = config.config_path.unwrap_or_else(|| dirs.config_file());
        Ok(Self { dirs, config_path })
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// Resolved directory layout.
    pub dirs: Dirs,
    /// Loaded settings.
    pub settings: Settings,
    /// GPU inventory shared by the resolver and the `gpus` command.
    pub inventory: Arc<dyn GpuInventoryPort>,
    /// PRIME offload checker.
    pub eligibility: Arc<dyn OffloadEligibilityPort>,
    /// Resolver wired to the ports above.
    pub resolver: GpuResolver,
}

impl CliContext {
    /// Compose a context from already-built parts.
    pub fn new(
        dirs: Dirs,
        settings: Settings,
        inventory: Arc<dyn GpuInventoryPort>,
        eligibility: Arc<dyn OffloadEligibilityPort>,
    ) -> Self {
        let resolver = GpuResolver::new(inventory.clone(), eligibility.clone());
        Self {
            dirs,
            settings,
            inventory,
            eligibility,
            resolver,
        }
    }

    /// Access the loaded settings.
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Access the resolver.
    pub const fn resolver(&self) -> &GpuResolver {
        &self.resolver
    }
}

/// Bootstrap the CLI application from resolved paths.
///
/// 1. Loads settings (writing the template on first run)
/// 2. Creates the cached sysfs inventory and the PRIME checker
/// 3. Wires them into a `GpuResolver`
pub fn bootstrap(paths: CliPaths) -> Result<CliContext> {
    let CliPaths { dirs, config_path } = paths;
    let settings = Settings::load_or_init(&config_path)?;
    debug!(
        path = %config_path.display(),
        renderer = %settings.renderer,
        gpu = %settings.gpu,
        "Settings loaded"
    );

    let inventory: Arc<dyn GpuInventoryPort> =
        Arc::new(CachedGpuInventory::new(SysfsGpuInventory::new()));

    let xdg_data_home = env::var_os("XDG_DATA_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);
    let eligibility: Arc<dyn OffloadEligibilityPort> =
        Arc::new(PrimeEligibility::new(xdg_data_home.as_deref()));

    Ok(CliContext::new(dirs, settings, inventory, eligibility))
}
