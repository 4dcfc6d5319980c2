//! GPU inventory port.

use crate::domain::GpuInventory;

/// Port for enumerating the display adapters on the host.
///
/// The returned order defines what a numeric GPU index means, so it must be
/// deterministic for a given hardware and driver state. Implementations that
/// cache must hand out a complete snapshot; a single call never observes a
/// half-refreshed inventory.
pub trait GpuInventoryPort: Send + Sync {
    /// Enumerate the GPUs in stable order.
    fn gpus(&self) -> GpuInventory;
}
