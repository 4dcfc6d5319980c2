//! GPU descriptors and their environment transformations.
//!
//! Each driver family owns the set of variables that forces rendering onto
//! one of its devices. The family is picked once, when the card is
//! enumerated, so resolution never branches on driver names.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::EnvMap;

/// Hardware metadata for one DRM card, as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpuCard {
    /// DRM card name (e.g. `card1`).
    pub card: String,
    /// PCI slot in `domain:bus:device.function` form (e.g. `0000:01:00.0`).
    pub pci_slot: String,
    /// PCI vendor id as four lowercase hex digits (e.g. `10de`).
    pub vendor_id: String,
    /// PCI device id as four lowercase hex digits.
    pub device_id: String,
    /// Kernel driver bound to the device (e.g. `amdgpu`, `nvidia`).
    pub driver: String,
    /// Whether this card drives a built-in panel (eDP, LVDS or DSI).
    pub embedded_display: bool,
}

impl GpuCard {
    /// PCI slot in the form accepted by Mesa's `DRI_PRIME` (`pci-0000_01_00_0`).
    pub fn dri_prime_tag(&self) -> String {
        format!("pci-{}", self.pci_slot.replace([':', '.'], "_"))
    }

    /// `vendor:device` pair as accepted by `MESA_VK_DEVICE_SELECT`.
    pub fn vendor_device(&self) -> String {
        format!("{}:{}", self.vendor_id, self.device_id)
    }
}

/// Driver family a device belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriverFamily {
    /// NVIDIA proprietary driver.
    Nvidia,
    /// Any Mesa-backed driver (amdgpu, radeon, i915, xe, nouveau, virtio...).
    Mesa,
}

impl DriverFamily {
    /// Family for a kernel driver name.
    pub fn from_driver(driver: &str) -> Self {
        if driver == "nvidia" {
            Self::Nvidia
        } else {
            Self::Mesa
        }
    }
}

impl fmt::Display for DriverFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nvidia => write!(f, "nvidia"),
            Self::Mesa => write!(f, "mesa"),
        }
    }
}

/// A GPU that can force itself into a launch environment.
///
/// `apply_env` must be pure: it returns a copy of `base` with this device's
/// keys set and every other key untouched, and applying it twice gives the
/// same map as applying it once.
pub trait GpuDevice: Send + Sync + fmt::Debug {
    /// Hardware metadata for this device.
    fn card(&self) -> &GpuCard;

    /// Driver family implementing the environment transformation.
    fn family(&self) -> DriverFamily;

    /// Return `base` with the variables that pin rendering to this device.
    fn apply_env(&self, base: &EnvMap) -> EnvMap;
}

/// Ordered GPU inventory. Indices into it are what users store in config.
pub type GpuInventory = Vec<Arc<dyn GpuDevice>>;

fn with_keys(base: &EnvMap, keys: [(&str, String); 5]) -> EnvMap {
    let mut env = base.clone();
    for (key, value) in keys {
        env.insert(key.to_string(), value);
    }
    env
}

/// Device driven by the NVIDIA proprietary driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NvidiaGpu {
    card: GpuCard,
}

impl NvidiaGpu {
    pub const fn new(card: GpuCard) -> Self {
        Self { card }
    }
}

impl GpuDevice for NvidiaGpu {
    fn card(&self) -> &GpuCard {
        &self.card
    }

    fn family(&self) -> DriverFamily {
        DriverFamily::Nvidia
    }

    fn apply_env(&self, base: &EnvMap) -> EnvMap {
        with_keys(
            base,
            [
                ("__NV_PRIME_RENDER_OFFLOAD", "1".to_string()),
                ("__VK_LAYER_NV_optimus", "NVIDIA_only".to_string()),
                ("__GLX_VENDOR_LIBRARY_NAME", "nvidia".to_string()),
                ("DRI_PRIME", self.card.dri_prime_tag()),
                ("MESA_VK_DEVICE_SELECT", self.card.vendor_device()),
            ],
        )
    }
}

/// Device driven by a Mesa driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MesaGpu {
    card: GpuCard,
}

impl MesaGpu {
    pub const fn new(card: GpuCard) -> Self {
        Self { card }
    }
}

impl GpuDevice for MesaGpu {
    fn card(&self) -> &GpuCard {
        &self.card
    }

    fn family(&self) -> DriverFamily {
        DriverFamily::Mesa
    }

    fn apply_env(&self, base: &EnvMap) -> EnvMap {
        // The NVIDIA keys are reset so a default table that assumes an
        // NVIDIA offload setup does not pull rendering away from this card.
        with_keys(
            base,
            [
                ("DRI_PRIME", self.card.dri_prime_tag()),
                ("MESA_VK_DEVICE_SELECT", self.card.vendor_device()),
                ("__GLX_VENDOR_LIBRARY_NAME", "mesa".to_string()),
                ("__NV_PRIME_RENDER_OFFLOAD", "0".to_string()),
                ("__VK_LAYER_NV_optimus", "non_NVIDIA_only".to_string()),
            ],
        )
    }
}

/// Wrap a card in the device implementation for its driver family.
pub fn device_for_card(card: GpuCard) -> Arc<dyn GpuDevice> {
    match DriverFamily::from_driver(&card.driver) {
        DriverFamily::Nvidia => Arc::new(NvidiaGpu::new(card)),
        DriverFamily::Mesa => Arc::new(MesaGpu::new(card)),
    }
}
