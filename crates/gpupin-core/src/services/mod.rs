//! Core services.
//!
//! Services orchestrate between ports and domain logic. They hold no state of
//! their own beyond the injected ports.

mod gpu_resolver;
mod launch_env;

pub use gpu_resolver::{GpuResolver, ResolveError};
pub use launch_env::LaunchEnv;
