//! PRIME render-offload eligibility.
//!
//! Offload only makes sense on hybrid machines: the first card drives the
//! built-in panel and a second card renders. Vulkan applications also need
//! a device-selection layer, otherwise the loader ignores `DRI_PRIME` and
//! `MESA_VK_DEVICE_SELECT`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use gpupin_core::GpuDevice;
use gpupin_core::ports::{OffloadCheckError, OffloadEligibilityPort};
use tracing::{debug, warn};

/// System directories holding implicit Vulkan layer manifests.
pub const DEFAULT_LAYER_DIRS: [&str; 3] = [
    "/usr/share/vulkan/implicit_layer.d",
    "/etc/vulkan/implicit_layer.d",
    "/usr/local/share/vulkan/implicit_layer.d",
];

/// Manifest names of layers that honour device-selection variables.
const MESA_DEVICE_SELECT_PREFIX: &str = "VkLayer_MESA_device_select";
const NVIDIA_LAYERS_MANIFEST: &str = "nvidia_layers.json";

/// Offload eligibility checker for Linux hybrid-graphics setups.
#[derive(Debug, Clone)]
pub struct PrimeEligibility {
    layer_dirs: Vec<PathBuf>,
}

impl PrimeEligibility {
    /// Checker over the system layer directories plus the user's
    /// `$XDG_DATA_HOME/vulkan/implicit_layer.d`, when given.
    pub fn new(xdg_data_home: Option<&Path>) -> Self {
        let mut layer_dirs: Vec<PathBuf> = DEFAULT_LAYER_DIRS.iter().map(PathBuf::from).collect();
        if let Some(data_home) = xdg_data_home {
            layer_dirs.push(data_home.join("vulkan").join("implicit_layer.d"));
        }
        Self { layer_dirs }
    }

    /// Checker over an explicit set of layer directories (used by tests).
    pub const fn with_layer_dirs(layer_dirs: Vec<PathBuf>) -> Self {
        Self { layer_dirs }
    }

    /// Look for a device-selection layer manifest.
    ///
    /// Missing directories are normal; an error is only returned when not a
    /// single directory could be read, because then nothing can be decided.
    fn has_device_select_layer(&self) -> Result<bool, OffloadCheckError> {
        let mut readable = 0usize;

        for dir in &self.layer_dirs {
            let entries = match fs::read_dir(dir) {
                Ok(entries) => entries,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => {
                    warn!("Cannot read Vulkan layer directory {}: {e}", dir.display());
                    continue;
                }
            };
            readable += 1;

            let found = entries
                .filter_map(Result::ok)
                .filter_map(|e| e.file_name().into_string().ok())
                .any(|name| {
                    (name.starts_with(MESA_DEVICE_SELECT_PREFIX) && name.ends_with(".json"))
                        || name == NVIDIA_LAYERS_MANIFEST
                });
            if found {
                debug!("Vulkan device-select layer found in {}", dir.display());
                return Ok(true);
            }
        }

        if readable == 0 {
            return Err(OffloadCheckError::LayerDirsUnavailable {
                searched: self.layer_dirs.clone(),
            });
        }

        Ok(false)
    }
}

impl Default for PrimeEligibility {
    fn default() -> Self {
        Self::new(None)
    }
}

impl OffloadEligibilityPort for PrimeEligibility {
    fn check_offload(
        &self,
        gpus: &[Arc<dyn GpuDevice>],
        offload_capable_api: bool,
    ) -> Result<bool, OffloadCheckError> {
        if gpus.len() < 2 {
            debug!(count = gpus.len(), "PRIME needs at least two GPUs");
            return Ok(false);
        }

        if !offload_capable_api {
            debug!("PRIME offload is not used with legacy graphics APIs");
            return Ok(false);
        }

        if !gpus[0].card().embedded_display {
            debug!(
                card = %gpus[0].card().card,
                "First GPU does not drive a built-in panel, not a hybrid setup"
            );
            return Ok(false);
        }

        let has_layer = self.has_device_select_layer()?;
        if !has_layer {
            warn!("No Vulkan device-select layer installed, PRIME offload unavailable");
        }
        Ok(has_layer)
    }
}
