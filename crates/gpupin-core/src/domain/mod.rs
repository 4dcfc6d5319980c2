//! Domain types for GPU selection and environment injection.
//!
//! These are pure types with no hardware access. Runtime adapters build
//! [`GpuCard`] values from the host and wrap them with [`device_for_card`].

mod gpu;
mod selection;

use std::collections::HashMap;

pub use gpu::{DriverFamily, GpuCard, GpuDevice, GpuInventory, MesaGpu, NvidiaGpu, device_for_card};
pub use selection::{GpuSelection, SelectionParseError};

/// Environment variables handed to the launched process.
///
/// Keys are unique and carry no ordering; callers that print the map
/// should sort it first.
pub type EnvMap = HashMap<String, String>;
