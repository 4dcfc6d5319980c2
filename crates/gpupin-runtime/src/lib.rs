//! Host probing for gpupin.
//!
//! Implements the core's hardware ports against the live system:
//! - [`SysfsGpuInventory`] enumerates DRM cards from `/sys/class/drm`
//! - [`CachedGpuInventory`] keeps an atomically refreshed snapshot
//! - [`PrimeEligibility`] decides whether PRIME render offload applies

#![deny(unsafe_code)]

pub mod system;

// Re-export the port implementations
pub use system::{CachedGpuInventory, PrimeEligibility, SysfsGpuInventory};
