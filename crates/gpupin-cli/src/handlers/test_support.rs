//! In-memory ports and fixtures for handler tests.

use std::path::Path;
use std::sync::Arc;

use gpupin_core::ports::{GpuInventoryPort, OffloadCheckError, OffloadEligibilityPort};
use gpupin_core::{Dirs, GpuCard, GpuDevice, GpuInventory, Settings, device_for_card};

use crate::bootstrap::{CliContext, CliPaths};

/// Hybrid laptop: Intel iGPU on the panel, NVIDIA dGPU second.
pub struct TwoGpus;

impl GpuInventoryPort for TwoGpus {
    fn gpus(&self) -> GpuInventory {
        let card = |n: u8, slot: &str, vendor: &str, driver: &str| GpuCard {
            card: format!("card{n}"),
            pci_slot: slot.to_string(),
            vendor_id: vendor.to_string(),
            device_id: "1234".to_string(),
            driver: driver.to_string(),
            embedded_display: n == 0,
        };
        vec![
            device_for_card(card(0, "0000:00:02.0", "8086", "i915")),
            device_for_card(card(1, "0000:01:00.0", "10de", "nvidia")),
        ]
    }
}

/// Scripted eligibility answers.
#[derive(Clone, Copy)]
pub enum Prime {
    /// Eligible whenever the API is offload-capable.
    Supported,
    /// Never eligible.
    Unsupported,
    /// The probe cannot decide.
    Broken,
}

impl OffloadEligibilityPort for Prime {
    fn check_offload(
        &self,
        _gpus: &[Arc<dyn GpuDevice>],
        offload_capable_api: bool,
    ) -> Result<bool, OffloadCheckError> {
        match self {
            Self::Supported => Ok(offload_capable_api),
            Self::Unsupported => Ok(false),
            Self::Broken => Err(OffloadCheckError::ProbeFailed("no display".to_string())),
        }
    }
}

/// Context over [`TwoGpus`] with the given settings and eligibility.
pub fn context(settings: Settings, prime: Prime) -> CliContext {
    let dirs = Dirs::from_lookup(Path::new("/home/tester"), |_| None);
    CliContext::new(dirs, settings, Arc::new(TwoGpus), Arc::new(prime))
}

/// Paths rooted in a temporary home, with the config file inside it.
pub fn paths_in(home: &Path) -> CliPaths {
    let dirs = Dirs::from_lookup(home, |_| None);
    let config_path = home.join("config.toml");
    CliPaths { dirs, config_path }
}
