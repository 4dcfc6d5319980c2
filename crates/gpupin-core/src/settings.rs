//! Launch settings and their TOML file.
//!
//! Settings are loaded once by the composition root and passed down by
//! reference. Loading never touches the process environment.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::GpuSelection;
use crate::paths::ensure_directory;

/// Template written when no configuration file exists yet.
pub const CONFIG_TEMPLATE: &str = "\
# gpupin configuration
#
# renderer = \"D3D11\"        # D3D11, D3D10, D3D9, Vulkan or OpenGL
# dxvk = true                # translate Direct3D to Vulkan
# gpu = \"default\"            # \"default\", \"<index>\" or \"prime:<index>\"
#
# [env]
# WINEDEBUG = \"fixme-all\"
";

/// Rendering backend the launched application is told to use.
///
/// Names are matched case-insensitively, both on the command line and in
/// the configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Renderer {
    #[default]
    D3D11,
    D3D10,
    D3D9,
    Vulkan,
    OpenGL,
}

impl Renderer {
    const ALL: [Self; 5] = [Self::D3D11, Self::D3D10, Self::D3D9, Self::Vulkan, Self::OpenGL];

    /// Name as written in the configuration file.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::D3D11 => "D3D11",
            Self::D3D10 => "D3D10",
            Self::D3D9 => "D3D9",
            Self::Vulkan => "Vulkan",
            Self::OpenGL => "OpenGL",
        }
    }

    /// Whether this renderer ends up on Vulkan, given the DXVK toggle.
    pub const fn is_vulkan(self, dxvk: bool) -> bool {
        match self {
            Self::Vulkan => true,
            Self::D3D11 | Self::D3D10 | Self::D3D9 => dxvk,
            Self::OpenGL => false,
        }
    }
}

impl fmt::Display for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Renderer {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SettingsError::UnknownRenderer(s.to_string()))
    }
}

impl TryFrom<String> for Renderer {
    type Error = SettingsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Launch settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics backend for the launched application.
    pub renderer: Renderer,

    /// Route Direct3D through DXVK (Vulkan) rather than wined3d (OpenGL).
    pub dxvk: bool,

    /// GPU to pin the launch to.
    pub gpu: GpuSelection,

    /// User environment overrides, applied on top of the defaults.
    pub env: BTreeMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            renderer: Renderer::default(),
            dxvk: true,
            gpu: GpuSelection::DEFAULT,
            env: BTreeMap::new(),
        }
    }
}

impl Settings {
    /// Whether the configured backend can use PRIME render offload.
    pub const fn is_offload_capable_api(&self) -> bool {
        self.renderer.is_vulkan(self.dxvk)
    }

    /// Parse settings from TOML text and validate them.
    pub fn from_toml(text: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(text).map_err(|e| SettingsError::Parse {
            path: None,
            reason: e.to_string(),
        })?;
        validate_settings(&settings)?;
        Ok(settings)
    }

    /// Load settings from `path`, writing the template first if it is missing.
    pub fn load_or_init(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            info!("No configuration at {}, writing template", path.display());
            write_template(path)?;
            return Ok(Self::default());
        }

        debug!("Loading configuration from {}", path.display());
        let text = fs::read_to_string(path).map_err(|e| SettingsError::Io {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Self::from_toml(&text).map_err(|e| match e {
            SettingsError::Parse { reason, .. } => SettingsError::Parse {
                path: Some(path.to_path_buf()),
                reason,
            },
            other => other,
        })
    }

    /// Render the effective settings as TOML.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        toml::to_string_pretty(self).map_err(|e| SettingsError::Serialize(e.to_string()))
    }
}

/// Write the commented configuration template to `path`.
pub fn write_template(path: &Path) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent() {
        ensure_directory(parent).map_err(|e| SettingsError::Io {
            path: parent.to_path_buf(),
            reason: e.to_string(),
        })?;
    }

    fs::write(path, CONFIG_TEMPLATE).map_err(|e| SettingsError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Settings loading and validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error(
        "Could not parse configuration{}: {reason}",
        path.as_ref().map(|p| format!(" file {}", p.display())).unwrap_or_default()
    )]
    Parse {
        path: Option<PathBuf>,
        reason: String,
    },

    #[error("Failed to access {path}: {reason}")]
    Io { path: PathBuf, reason: String },

    #[error("Failed to serialize settings: {0}")]
    Serialize(String),

    #[error("Unknown renderer '{0}': expected D3D11, D3D10, D3D9, Vulkan or OpenGL")]
    UnknownRenderer(String),

    #[error("GPU index must be >= -1, got {0}")]
    InvalidGpuIndex(i32),

    #[error("Invalid environment variable name '{0}'")]
    InvalidEnvKey(String),
}

/// Validate settings values.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if settings.gpu.index < GpuSelection::DEFAULT_INDEX {
        return Err(SettingsError::InvalidGpuIndex(settings.gpu.index));
    }

    if let Some(key) = settings
        .env
        .keys()
        .find(|k| k.is_empty() || k.contains('=') || k.contains('\0'))
    {
        return Err(SettingsError::InvalidEnvKey(key.clone()));
    }

    Ok(())
}
