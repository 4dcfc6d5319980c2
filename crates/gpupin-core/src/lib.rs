//! Core domain for gpupin.
//!
//! Decides which GPU a launch should target and produces the environment
//! that forces it. Hardware access lives behind the traits in [`ports`];
//! concrete probes are provided by `gpupin-runtime`.

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod paths;
pub mod ports;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{
    DriverFamily, EnvMap, GpuCard, GpuDevice, GpuInventory, GpuSelection, MesaGpu, NvidiaGpu,
    SelectionParseError, device_for_card,
};
pub use paths::{Dirs, PathError};
pub use ports::{GpuInventoryPort, OffloadCheckError, OffloadEligibilityPort};
pub use services::{GpuResolver, LaunchEnv, ResolveError};
pub use settings::{Renderer, Settings, SettingsError, validate_settings};

// Used by the integration tests only
#[cfg(test)]
use mockall as _;
