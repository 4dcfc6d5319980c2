//! GPU target resolution.
//!
//! Turns a [`GpuSelection`] into the environment that pins a launch to one
//! device. The inventory is only enumerated when a device was actually
//! selected, and offload eligibility is only checked when PRIME was asked for.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{EnvMap, GpuSelection};
use crate::ports::{GpuInventoryPort, OffloadCheckError, OffloadEligibilityPort};

/// Errors that abort a resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The offload eligibility probe could not reach a decision.
    #[error(transparent)]
    EligibilityCheckFailed(#[from] OffloadCheckError),

    /// The selected index has no entry in the inventory.
    #[error("GPU {index} not found ({available} GPU(s) detected)")]
    DeviceNotFound { index: i32, available: usize },
}

/// Resolves a GPU selection against the host inventory.
///
/// The resolver is stateless: every call enumerates afresh through the
/// injected ports and never mutates the caller's environment.
#[derive(Clone)]
pub struct GpuResolver {
    inventory: Arc<dyn GpuInventoryPort>,
    eligibility: Arc<dyn OffloadEligibilityPort>,
}

impl GpuResolver {
    /// Create a resolver over the given inventory and eligibility probes.
    pub fn new(
        inventory: Arc<dyn GpuInventoryPort>,
        eligibility: Arc<dyn OffloadEligibilityPort>,
    ) -> Self {
        Self {
            inventory,
            eligibility,
        }
    }

    /// Resolve `selection` and return the environment for the launch.
    ///
    /// Returns a copy of `env` unchanged when no device is selected, or when
    /// PRIME was requested and the host does not support it. Otherwise the
    /// selected device's variables are applied on top of `env`.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::EligibilityCheckFailed`] if PRIME was requested and
    ///   eligibility could not be determined.
    /// - [`ResolveError::DeviceNotFound`] if the index is outside the inventory.
    pub fn resolve(
        &self,
        selection: GpuSelection,
        env: &EnvMap,
        offload_capable_api: bool,
    ) -> Result<EnvMap, ResolveError> {
        if selection.is_default() {
            debug!("No GPU selected, using default rendering path");
            return Ok(env.clone());
        }

        let gpus = self.inventory.gpus();

        if selection.prime {
            let allowed = self.eligibility.check_offload(&gpus, offload_capable_api)?;
            if !allowed {
                info!(
                    index = selection.index,
                    offload_capable_api, "PRIME offload not available, using default GPU"
                );
                return Ok(env.clone());
            }
        }

        let device = usize::try_from(selection.index)
            .ok()
            .and_then(|i| gpus.get(i))
            .ok_or(ResolveError::DeviceNotFound {
                index: selection.index,
                available: gpus.len(),
            })?;

        let card = device.card();
        debug!(
            index = selection.index,
            card = %card.card,
            pci_slot = %card.pci_slot,
            family = %device.family(),
            "Pinning launch to GPU"
        );

        Ok(device.apply_env(env))
    }
}
