//! Launch environment assembly.
//!
//! Layering, lowest precedence first:
//! 1. built-in defaults derived from [`Dirs`]
//! 2. the user's `[env]` table
//! 3. platform requirements that must not be overridden
//! 4. the selected GPU's device keys (see [`GpuResolver`])

use crate::domain::EnvMap;
use crate::paths::Dirs;
use crate::settings::Settings;

use super::{GpuResolver, ResolveError};

/// Builds the environment handed to the process launcher.
pub struct LaunchEnv;

impl LaunchEnv {
    /// Built-in defaults before any user override.
    pub fn defaults(dirs: &Dirs) -> EnvMap {
        let path = |p: &std::path::Path| p.to_string_lossy().into_owned();

        [
            ("WINEPREFIX", path(&dirs.prefix)),
            ("WINEARCH", "win64".to_string()),
            ("WINEDEBUG", "-all".to_string()),
            (
                "WINEDLLOVERRIDES",
                "dxdiagn=d;winemenubuilder.exe=d;".to_string(),
            ),
            ("DXVK_LOG_LEVEL", "warn".to_string()),
            ("DXVK_LOG_PATH", "none".to_string()),
            ("DXVK_STATE_CACHE_PATH", path(&dirs.dxvk_state_cache)),
            ("MESA_GL_VERSION_OVERRIDE", "4.4".to_string()),
            ("__GL_THREADED_OPTIMIZATIONS", "1".to_string()),
            ("DRI_PRIME", "1".to_string()),
            ("__NV_PRIME_RENDER_OFFLOAD", "1".to_string()),
            ("__VK_LAYER_NV_optimus", "NVIDIA_only".to_string()),
            ("__GLX_VENDOR_LIBRARY_NAME", "nvidia".to_string()),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }

    /// Defaults merged with user overrides and platform requirements.
    pub fn base(settings: &Settings, dirs: &Dirs) -> EnvMap {
        let mut env = Self::defaults(dirs);
        env.extend(settings.env.iter().map(|(k, v)| (k.clone(), v.clone())));

        // FreeBSD's wine has no WoW64 support
        if cfg!(target_os = "freebsd") {
            env.insert("WINEARCH".to_string(), "win32".to_string());
            env.insert("WINE_NO_WOW64".to_string(), "1".to_string());
        }

        env
    }

    /// Full launch environment, including the configured GPU selection.
    pub fn resolve(
        settings: &Settings,
        dirs: &Dirs,
        resolver: &GpuResolver,
    ) -> Result<EnvMap, ResolveError> {
        let base = Self::base(settings, dirs);
        resolver.resolve(settings.gpu, &base, settings.is_offload_capable_api())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GpuCard, GpuInventory, GpuSelection, device_for_card};
    use crate::ports::{GpuInventoryPort, OffloadCheckError, OffloadEligibilityPort};
    use std::path::Path;
    use std::sync::Arc;

    struct FixedInventory;

    impl GpuInventoryPort for FixedInventory {
        fn gpus(&self) -> GpuInventory {
            vec![device_for_card(GpuCard {
                card: "card0".to_string(),
                pci_slot: "0000:00:02.0".to_string(),
                vendor_id: "8086".to_string(),
                device_id: "9bc4".to_string(),
                driver: "i915".to_string(),
                embedded_display: true,
            })]
        }
    }

    struct NeverEligible;

    impl OffloadEligibilityPort for NeverEligible {
        fn check_offload(
            &self,
            _gpus: &[Arc<dyn crate::domain::GpuDevice>],
            _offload_capable_api: bool,
        ) -> Result<bool, OffloadCheckError> {
            Ok(false)
        }
    }

    fn dirs() -> Dirs {
        Dirs::from_lookup(Path::new("/home/u"), |_| None)
    }

    fn resolver() -> GpuResolver {
        GpuResolver::new(Arc::new(FixedInventory), Arc::new(NeverEligible))
    }

    #[test]
    fn test_defaults_use_dirs() {
        let env = LaunchEnv::defaults(&dirs());
        assert_eq!(env["WINEPREFIX"], "/home/u/.local/share/gpupin/pfx");
        assert_eq!(env["DXVK_STATE_CACHE_PATH"], "/home/u/.cache/gpupin/dxvk");
        assert_eq!(env["DRI_PRIME"], "1");
        assert_eq!(env.len(), 13);
    }

    #[test]
    fn test_user_overrides_win_over_defaults() {
        let mut settings = Settings::default();
        settings.env.insert("WINEDEBUG".to_string(), "fixme-all".to_string());
        settings.env.insert("DXVK_HUD".to_string(), "fps".to_string());

        let env = LaunchEnv::base(&settings, &dirs());
        let defaults = LaunchEnv::base(&Settings::default(), &dirs());
        assert_eq!(env["WINEDEBUG"], "fixme-all");
        assert_eq!(env["DXVK_HUD"], "fps");
        assert_eq!(env["WINEARCH"], defaults["WINEARCH"]);
    }

    #[test]
    fn test_resolve_default_gpu_is_base() {
        let settings = Settings::default();
        let env = LaunchEnv::resolve(&settings, &dirs(), &resolver()).unwrap();
        assert_eq!(env, LaunchEnv::base(&settings, &dirs()));
    }

    #[test]
    fn test_device_keys_beat_user_overrides() {
        let mut settings = Settings {
            gpu: GpuSelection::device(0),
            ..Settings::default()
        };
        settings.env.insert("DRI_PRIME".to_string(), "0".to_string());
        settings.env.insert("FOO".to_string(), "bar".to_string());

        let env = LaunchEnv::resolve(&settings, &dirs(), &resolver()).unwrap();
        assert_eq!(env["DRI_PRIME"], "pci-0000_00_02_0");
        assert_eq!(env["MESA_VK_DEVICE_SELECT"], "8086:9bc4");
        assert_eq!(env["FOO"], "bar");
    }

    #[test]
    fn test_prime_declined_keeps_base() {
        let settings = Settings {
            gpu: GpuSelection::prime(0),
            ..Settings::default()
        };
        let env = LaunchEnv::resolve(&settings, &dirs(), &resolver()).unwrap();
        assert_eq!(env, LaunchEnv::base(&settings, &dirs()));
    }

    #[test]
    fn test_missing_device_is_error() {
        let settings = Settings {
            gpu: GpuSelection::device(3),
            ..Settings::default()
        };
        let err = LaunchEnv::resolve(&settings, &dirs(), &resolver()).unwrap_err();
        assert!(matches!(err, ResolveError::DeviceNotFound { index: 3, .. }));
    }
}
