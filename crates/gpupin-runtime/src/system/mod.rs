//! System probe implementations.
//!
//! Each type here implements one port from `gpupin_core::ports`. They are
//! constructed in the CLI's bootstrap and injected into `GpuResolver`.

mod cache;
mod drm;
mod prime;

pub use cache::CachedGpuInventory;
pub use drm::{DEFAULT_DRM_ROOT, SysfsGpuInventory};
pub use prime::{DEFAULT_LAYER_DIRS, PrimeEligibility};
