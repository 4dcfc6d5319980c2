//! PRIME render-offload eligibility port.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::domain::GpuDevice;

/// Errors that prevent deciding whether offload is available.
///
/// These are distinct from a negative answer: "not eligible" is `Ok(false)`.
#[derive(Debug, Error)]
pub enum OffloadCheckError {
    /// None of the Vulkan layer manifest directories could be read.
    #[error(
        "Cannot determine PRIME support: no readable Vulkan layer directory among {searched:?}"
    )]
    LayerDirsUnavailable { searched: Vec<PathBuf> },

    /// A capability probe failed to run.
    ///
    /// `PrimeEligibility` in `gpupin-runtime` only reports
    /// `LayerDirsUnavailable`; this variant is for checkers that shell out
    /// to tools such as `vulkaninfo` or query a display server.
    #[error("PRIME capability probe failed: {0}")]
    ProbeFailed(String),
}

/// Port for deciding whether PRIME render offload applies on this host.
pub trait OffloadEligibilityPort: Send + Sync {
    /// Check whether offload is usable for `gpus` with the given API.
    ///
    /// `offload_capable_api` is `false` for legacy APIs, which never offload.
    fn check_offload(
        &self,
        gpus: &[Arc<dyn GpuDevice>],
        offload_capable_api: bool,
    ) -> Result<bool, OffloadCheckError>;
}
