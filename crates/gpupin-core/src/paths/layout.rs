//! Resolved directory layout.

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use super::ensure::ensure_directory;
use super::error::PathError;

/// Name of the per-application directory under each XDG root.
pub const APP_DIR_NAME: &str = "gpupin";

/// Name of the configuration file inside [`Dirs::config`].
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// All directories gpupin reads from or writes to.
///
/// Built once by the composition root and passed by reference; nothing in
/// the core reads the process environment on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dirs {
    /// `$XDG_CACHE_HOME/gpupin`
    pub cache: PathBuf,
    /// `$XDG_CONFIG_HOME/gpupin`
    pub config: PathBuf,
    /// `$XDG_DATA_HOME/gpupin`
    pub data: PathBuf,
    /// Wine prefix (`data/pfx`).
    pub prefix: PathBuf,
    /// Log directory (`cache/logs`).
    pub logs: PathBuf,
    /// DXVK pipeline state cache (`cache/dxvk`).
    pub dxvk_state_cache: PathBuf,
}

impl Dirs {
    /// Resolve the layout from the current process environment.
    pub fn resolve() -> Result<Self, PathError> {
        let home = dirs::home_dir().ok_or(PathError::NoHomeDir)?;
        Ok(Self::from_lookup(&home, |key| env::var(key).ok()))
    }

    /// Resolve the layout from an explicit home directory and variable lookup.
    ///
    /// XDG variables that are unset or empty fall back to their defaults
    /// under `home`.
    pub fn from_lookup<F>(home: &Path, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let xdg = |key: &str, fallback: &[&str]| -> PathBuf {
            lookup(key)
                .filter(|value| !value.is_empty())
                .map_or_else(
                    || fallback.iter().fold(home.to_path_buf(), |p, c| p.join(c)),
                    PathBuf::from,
                )
                .join(APP_DIR_NAME)
        };

        let cache = xdg("XDG_CACHE_HOME", &[".cache"]);
        let config = xdg("XDG_CONFIG_HOME", &[".config"]);
        let data = xdg("XDG_DATA_HOME", &[".local", "share"]);

        Self {
            prefix: data.join("pfx"),
            logs: cache.join("logs"),
            dxvk_state_cache: cache.join("dxvk"),
            cache,
            config,
            data,
        }
    }

    /// Path of the configuration file.
    pub fn config_file(&self) -> PathBuf {
        self.config.join(CONFIG_FILE_NAME)
    }

    /// Create the leaf directories. Their parents are created along the way.
    pub fn ensure(&self) -> Result<(), PathError> {
        ensure_directory(&self.logs)?;
        ensure_directory(&self.prefix)
    }
}

impl fmt::Display for Dirs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "cache = {}", self.cache.display())?;
        writeln!(f, "config = {}", self.config.display())?;
        writeln!(f, "data = {}", self.data.display())?;
        writeln!(f, "prefix = {}", self.prefix.display())?;
        writeln!(f, "logs = {}", self.logs.display())?;
        write!(f, "dxvk_state_cache = {}", self.dxvk_state_cache.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_under_home() {
        let dirs = Dirs::from_lookup(Path::new("/home/u"), lookup(&[]));

        assert_eq!(dirs.cache, PathBuf::from("/home/u/.cache/gpupin"));
        assert_eq!(dirs.config, PathBuf::from("/home/u/.config/gpupin"));
        assert_eq!(dirs.data, PathBuf::from("/home/u/.local/share/gpupin"));
        assert_eq!(dirs.prefix, PathBuf::from("/home/u/.local/share/gpupin/pfx"));
        assert_eq!(dirs.logs, PathBuf::from("/home/u/.cache/gpupin/logs"));
        assert_eq!(dirs.dxvk_state_cache, PathBuf::from("/home/u/.cache/gpupin/dxvk"));
        assert_eq!(
            dirs.config_file(),
            PathBuf::from("/home/u/.config/gpupin/config.toml")
        );
    }

    #[test]
    fn test_xdg_overrides_and_empty_values() {
        let dirs = Dirs::from_lookup(
            Path::new("/home/u"),
            lookup(&[("XDG_CACHE_HOME", "/tmp/cache"), ("XDG_CONFIG_HOME", "")]),
        );

        assert_eq!(dirs.cache, PathBuf::from("/tmp/cache/gpupin"));
        assert_eq!(dirs.config, PathBuf::from("/home/u/.config/gpupin"));
    }

    #[test]
    fn test_ensure_creates_leaf_directories() {
        let temp = tempdir().unwrap();
        let dirs = Dirs::from_lookup(temp.path(), lookup(&[]));

        dirs.ensure().unwrap();
        assert!(dirs.logs.is_dir());
        assert!(dirs.prefix.is_dir());
    }

    #[test]
    fn test_display_is_key_value() {
        let dirs = Dirs::from_lookup(Path::new("/home/u"), lookup(&[]));
        let output = dirs.to_string();

        for key in [
            "cache = ",
            "config = ",
            "data = ",
            "prefix = ",
            "logs = ",
            "dxvk_state_cache = ",
        ] {
            assert!(output.contains(key), "missing {key}");
        }
    }
}
