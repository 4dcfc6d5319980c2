//! GPU selection descriptor.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Which GPU a launch should be pinned to.
///
/// `index == -1` means no explicit device: the default rendering path is
/// used and the inventory is never queried. Any other value is looked up in
/// the inventory at resolution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GpuSelection {
    /// Position in the GPU inventory, or `-1` for the default device.
    pub index: i32,
    /// Only pin the device when PRIME render offload is available.
    pub prime: bool,
}

impl GpuSelection {
    /// Sentinel index for "no explicit device".
    pub const DEFAULT_INDEX: i32 = -1;

    /// The default rendering path.
    pub const DEFAULT: Self = Self {
        index: Self::DEFAULT_INDEX,
        prime: false,
    };

    /// Pin the device at `index`.
    pub const fn device(index: i32) -> Self {
        Self {
            index,
            prime: false,
        }
    }

    /// Pin the device at `index`, but only if PRIME offload is eligible.
    pub const fn prime(index: i32) -> Self {
        Self { index, prime: true }
    }

    /// Whether this is the "no explicit device" sentinel.
    pub const fn is_default(&self) -> bool {
        self.index == Self::DEFAULT_INDEX
    }
}

impl Default for GpuSelection {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for GpuSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.is_default(), self.prime) {
            (true, false) => write!(f, "default"),
            (true, true) => write!(f, "prime:default"),
            (false, false) => write!(f, "{}", self.index),
            (false, true) => write!(f, "prime:{}", self.index),
        }
    }
}

/// Error parsing a textual GPU selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionParseError {
    #[error("Invalid GPU index '{0}': expected an integer >= -1")]
    InvalidIndex(String),

    #[error("Empty GPU selection")]
    Empty,
}

impl FromStr for GpuSelection {
    type Err = SelectionParseError;

    /// Accepts `default`, `-1`, `<index>`, `prime:<index>` and `prime:default`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().to_lowercase();
        if trimmed.is_empty() {
            return Err(SelectionParseError::Empty);
        }

        let (prime, rest) = match trimmed.strip_prefix("prime:") {
            Some(rest) => (true, rest),
            None => (false, trimmed.as_str()),
        };

        let index = if rest == "default" {
            Self::DEFAULT_INDEX
        } else {
            rest.parse::<i32>()
                .ok()
                .filter(|i| *i >= Self::DEFAULT_INDEX)
                .ok_or_else(|| SelectionParseError::InvalidIndex(rest.to_string()))?
        };

        Ok(Self { index, prime })
    }
}

// The config file accepts either a table (`{ index = 1, prime = true }`)
// or the short string form (`"prime:1"`).
impl<'de> Deserialize<'de> for GpuSelection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Table {
            #[serde(default = "default_index")]
            index: i32,
            #[serde(default)]
            prime: bool,
        }

        const fn default_index() -> i32 {
            GpuSelection::DEFAULT_INDEX
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Index(i32),
            Text(String),
            Table(Table),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Index(index) => Ok(Self::device(index)),
            Repr::Text(text) => text.parse().map_err(serde::de::Error::custom),
            Repr::Table(table) => Ok(Self {
                index: table.index,
                prime: table.prime,
            }),
        }
    }
}
