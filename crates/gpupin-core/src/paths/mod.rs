//! Directory layout for gpupin.
//!
//! Follows the XDG base directory convention:
//! - configuration in `$XDG_CONFIG_HOME/gpupin`
//! - the wine prefix under `$XDG_DATA_HOME/gpupin`
//! - logs and the DXVK state cache under `$XDG_CACHE_HOME/gpupin`

mod ensure;
mod error;
mod layout;

pub use ensure::ensure_directory;
pub use error::PathError;
pub use layout::{APP_DIR_NAME, CONFIG_FILE_NAME, Dirs};
