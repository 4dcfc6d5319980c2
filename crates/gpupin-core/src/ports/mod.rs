//! Port definitions (trait abstractions) for hardware probing.
//!
//! Ports define the interfaces the core expects from the host. They contain
//! no implementation details; `gpupin-runtime` provides the sysfs and Vulkan
//! layer probes, tests provide in-memory doubles.

mod gpu_inventory;
mod offload;

pub use gpu_inventory::GpuInventoryPort;
pub use offload::{OffloadCheckError, OffloadEligibilityPort};
