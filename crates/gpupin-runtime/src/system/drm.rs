//! DRM card enumeration via sysfs.
//!
//! Every `cardN` entry under `/sys/class/drm` is one GPU. Connector entries
//! (`cardN-eDP-1`, `cardN-HDMI-A-1`, ...) are not GPUs but tell us whether a
//! card drives the built-in panel.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use gpupin_core::ports::GpuInventoryPort;
use gpupin_core::{GpuCard, GpuInventory, device_for_card};
use thiserror::Error;
use tracing::{debug, warn};

/// Where the kernel exposes DRM devices.
pub const DEFAULT_DRM_ROOT: &str = "/sys/class/drm";

/// Connector types that indicate a built-in panel.
const EMBEDDED_CONNECTORS: [&str; 3] = ["eDP", "LVDS", "DSI"];

#[derive(Debug, Error)]
enum CardReadError {
    #[error("cannot read {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("no PCI slot for {0}")]
    NoPciSlot(String),
}

/// GPU inventory backed by `/sys/class/drm`.
///
/// Cards are ordered by their DRM minor number, which is what users see as
/// `card0`, `card1`, ... and what the index in the configuration refers to.
#[derive(Debug, Clone)]
pub struct SysfsGpuInventory {
    root: PathBuf,
}

impl SysfsGpuInventory {
    /// Inventory over the live sysfs tree.
    pub fn new() -> Self {
        Self::with_root(DEFAULT_DRM_ROOT)
    }

    /// Inventory over an alternative DRM root (used by tests).
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Enumerate cards, skipping any whose metadata cannot be read.
    pub fn enumerate(&self) -> Vec<GpuCard> {
        let entries: Vec<String> = match fs::read_dir(&self.root) {
            Ok(read_dir) => read_dir
                .filter_map(Result::ok)
                .filter_map(|e| e.file_name().into_string().ok())
                .collect(),
            Err(e) => {
                warn!("Cannot read DRM root {}: {e}", self.root.display());
                return Vec::new();
            }
        };

        let mut cards: Vec<(u32, &str)> = entries
            .iter()
            .filter_map(|name| card_number(name).map(|n| (n, name.as_str())))
            .collect();
        cards.sort_unstable_by_key(|(n, _)| *n);

        cards
            .into_iter()
            .filter_map(|(_, name)| match self.read_card(name, &entries) {
                Ok(card) => {
                    debug!(
                        card = %card.card,
                        pci_slot = %card.pci_slot,
                        driver = %card.driver,
                        embedded_display = card.embedded_display,
                        "Found GPU"
                    );
                    Some(card)
                }
                Err(e) => {
                    warn!("Skipping {name}: {e}");
                    None
                }
            })
            .collect()
    }

    fn read_card(&self, name: &str, entries: &[String]) -> Result<GpuCard, CardReadError> {
        let device = self.root.join(name).join("device");

        let vendor_id = read_pci_id(&device.join("vendor"))?;
        let device_id = read_pci_id(&device.join("device"))?;
        let pci_slot =
            read_pci_slot(&device)?.ok_or_else(|| CardReadError::NoPciSlot(name.to_string()))?;

        // Unbound devices have no driver link
        let driver = fs::read_link(device.join("driver"))
            .ok()
            .and_then(|link| link.file_name().map(|f| f.to_string_lossy().into_owned()))
            .unwrap_or_default();

        Ok(GpuCard {
            card: name.to_string(),
            pci_slot,
            vendor_id,
            device_id,
            driver,
            embedded_display: self.drives_embedded_panel(name, entries),
        })
    }

    fn drives_embedded_panel(&self, name: &str, entries: &[String]) -> bool {
        let prefix = format!("{name}-");
        entries
            .iter()
            .filter_map(|entry| entry.strip_prefix(&prefix).map(|connector| (entry, connector)))
            .filter(|(_, connector)| {
                EMBEDDED_CONNECTORS
                    .iter()
                    .any(|kind| connector.starts_with(&format!("{kind}-")))
            })
            .any(|(entry, _)| {
                // A connector without a readable status is assumed present
                fs::read_to_string(self.root.join(entry).join("status"))
                    .map_or(true, |status| status.trim() != "disconnected")
            })
    }
}

impl Default for SysfsGpuInventory {
    fn default() -> Self {
        Self::new()
    }
}

impl GpuInventoryPort for SysfsGpuInventory {
    fn gpus(&self) -> GpuInventory {
        self.enumerate().into_iter().map(device_for_card).collect()
    }
}

/// `card3` -> `Some(3)`; connectors like `card0-eDP-1` -> `None`.
fn card_number(name: &str) -> Option<u32> {
    name.strip_prefix("card")?.parse().ok()
}

fn read_to_string(path: &Path) -> Result<String, CardReadError> {
    fs::read_to_string(path).map_err(|source| CardReadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// `0x10DE\n` -> `10de`.
fn read_pci_id(path: &Path) -> Result<String, CardReadError> {
    let raw = read_to_string(path)?;
    let trimmed = raw.trim();
    Ok(trimmed
        .strip_prefix("0x")
        .unwrap_or(trimmed)
        .to_ascii_lowercase())
}

fn read_pci_slot(device: &Path) -> Result<Option<String>, CardReadError> {
    let uevent = read_to_string(&device.join("uevent"))?;
    Ok(uevent
        .lines()
        .find_map(|line| line.strip_prefix("PCI_SLOT_NAME="))
        .map(|slot| slot.trim().to_string()))
}
