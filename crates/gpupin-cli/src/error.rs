//! CLI-specific error types and mappings.
//!
//! Maps domain errors to exit codes so scripts wrapping `gpupin env` can
//! tell a missing GPU from a broken probe.

use gpupin_core::{PathError, ResolveError, SettingsError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The selected GPU does not exist.
    #[error("{0}")]
    DeviceNotFound(String),

    /// PRIME eligibility could not be determined.
    #[error("{0}")]
    Probe(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CliError {
    /// Map error to a sysexits.h exit code.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::DeviceNotFound(_) => 69, // EX_UNAVAILABLE
            Self::Probe(_) => 71,          // EX_OSERR
            Self::Io(_) => 74,             // EX_IOERR
            Self::Config(_) => 78,         // EX_CONFIG
        }
    }

    /// Exit code for an arbitrary error returned from a handler.
    pub fn exit_code_for(err: &anyhow::Error) -> i32 {
        if let Some(cli) = err.downcast_ref::<Self>() {
            return cli.exit_code();
        }
        if let Some(resolve) = err.downcast_ref::<ResolveError>() {
            return Self::from(resolve).exit_code();
        }
        if let Some(settings) = err.downcast_ref::<SettingsError>() {
            return Self::from(settings).exit_code();
        }
        if let Some(path) = err.downcast_ref::<PathError>() {
            return Self::from(path).exit_code();
        }
        1
    }
}

impl From<&ResolveError> for CliError {
    fn from(err: &ResolveError) -> Self {
        match err {
            ResolveError::DeviceNotFound { .. } => Self::DeviceNotFound(err.to_string()),
            ResolveError::EligibilityCheckFailed(_) => Self::Probe(err.to_string()),
        }
    }
}

impl From<ResolveError> for CliError {
    fn from(err: ResolveError) -> Self {
        Self::from(&err)
    }
}

impl From<&SettingsError> for CliError {
    fn from(err: &SettingsError) -> Self {
        match err {
            SettingsError::Io { .. } => Self::Io(err.to_string()),
            _ => Self::Config(err.to_string()),
        }
    }
}

impl From<&PathError> for CliError {
    fn from(err: &PathError) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpupin_core::OffloadCheckError;

    #[test]
    fn test_resolve_errors_map_to_distinct_codes() {
        let missing = CliError::from(ResolveError::DeviceNotFound {
            index: 4,
            available: 2,
        });
        assert_eq!(missing.exit_code(), 69);
        assert_eq!(missing.to_string(), "GPU 4 not found (2 GPU(s) detected)");

        let probe = CliError::from(ResolveError::EligibilityCheckFailed(
            OffloadCheckError::ProbeFailed("x".into()),
        ));
        assert_eq!(probe.exit_code(), 71);
    }

    #[test]
    fn test_exit_code_for_anyhow() {
        let err = anyhow::Error::new(ResolveError::DeviceNotFound {
            index: 1,
            available: 0,
        });
        assert_eq!(CliError::exit_code_for(&err), 69);

        let err = anyhow::Error::new(SettingsError::InvalidGpuIndex(-5));
        assert_eq!(CliError::exit_code_for(&err), 78);

        let err = anyhow::Error::new(PathError::CreateFailed {
            path: "/x".into(),
            reason: "denied".into(),
        });
        assert_eq!(CliError::exit_code_for(&err), 74);

        let err = anyhow::anyhow!("something else");
        assert_eq!(CliError::exit_code_for(&err), 1);
    }

    #[test]
    fn test_settings_errors_split_io_from_config() {
        let unreadable = SettingsError::Io {
            path: "/etc/gpupin/config.toml".into(),
            reason: "permission denied".into(),
        };
        assert!(matches!(CliError::from(&unreadable), CliError::Io(_)));
        assert_eq!(CliError::from(&unreadable).exit_code(), 74);

        let bad_renderer = SettingsError::UnknownRenderer("Glide".into());
        assert!(matches!(CliError::from(&bad_renderer), CliError::Config(_)));
        assert_eq!(CliError::from(&bad_renderer).exit_code(), 78);

        // Context added by bootstrap does not hide the underlying error
        let err = anyhow::Error::new(unreadable).context("Failed to load settings");
        assert_eq!(CliError::exit_code_for(&err), 74);
    }
}
