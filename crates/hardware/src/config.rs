//! Configuration system for the FTQ model.
//!
//! This module defines the configuration structures used to parameterize the
//! queue and the simulator that drives it. It provides:
//! 1. **Defaults:** Baseline queue depth, fetch width, history length and port count.
//! 2. **Structures:** `GeneralConfig` for simulator behavior, `FtqConfig` for the queue.
//! 3. **Validation:** `Config::validate` rejects shapes the queue cannot represent.
//!
//! Configuration is supplied as JSON (usually embedded in a stimulus file) or
//! built with `Config::default()`.

use serde::{Deserialize, Serialize};

use crate::common::constants::{MAX_FETCH_WIDTH, MAX_GHIST_LENGTH, MIN_QUEUE_ENTRIES};
use crate::common::error::ConfigError;

/// Default configuration constants.
mod defaults {
    /// Default queue depth (16 fetch bundles in flight).
    pub const NUM_ENTRIES: usize = 16;

    /// Default fetch width (4 instruction slots per bundle).
    pub const FETCH_WIDTH: usize = 4;

    /// Default global history length in bits.
    pub const GHIST_LENGTH: usize = 64;

    /// Default number of lookup ports (branch unit and jump unit).
    pub const LOOKUP_PORTS: usize = 2;
}

/// Root configuration structure.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use ftqsim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.ftq.num_entries, 16);
/// assert!(config.validate().is_ok());
/// ```
///
/// Deserializing from JSON, with omitted fields taking their defaults:
///
/// ```
/// use ftqsim_core::config::Config;
///
/// let json = r#"{
///     "general": { "trace_updates": true },
///     "ftq": { "num_entries": 32, "fetch_width": 8 }
/// }"#;
///
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert!(config.general.trace_updates);
/// assert_eq!(config.ftq.num_entries, 32);
/// assert_eq!(config.ftq.fetch_width, 8);
/// assert_eq!(config.ftq.lookup_ports, 2);
/// assert_eq!(config.ftq.idx_bits(), 5);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Fetch target queue shape
    #[serde(default)]
    pub ftq: FtqConfig,
}

impl Config {
    /// Checks that the configuration describes a queue the model can build.
    ///
    /// # Errors
    ///
    /// Returns the first violated bound as a [`ConfigError`].
    pub const fn validate(&self) -> Result<(), ConfigError> {
        self.ftq.validate()
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Emit a `tracing` event for every step's outputs.
    #[serde(default)]
    pub trace_updates: bool,
}

/// Fetch target queue configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FtqConfig {
    /// Number of ring slots
    #[serde(default = "FtqConfig::default_num_entries")]
    pub num_entries: usize,

    /// Instruction slots per fetch bundle (width of branch/jump masks)
    #[serde(default = "FtqConfig::default_fetch_width")]
    pub fetch_width: usize,

    /// Global history length in bits
    #[serde(default = "FtqConfig::default_ghist_length")]
    pub ghist_length: usize,

    /// Number of independent lookup ports
    #[serde(default = "FtqConfig::default_lookup_ports")]
    pub lookup_ports: usize,
}

impl FtqConfig {
    /// Returns the default queue depth.
    fn default_num_entries() -> usize {
        defaults::NUM_ENTRIES
    }

    /// Returns the default fetch width.
    fn default_fetch_width() -> usize {
        defaults::FETCH_WIDTH
    }

    /// Returns the default global history length.
    fn default_ghist_length() -> usize {
        defaults::GHIST_LENGTH
    }

    /// Returns the default number of lookup ports.
    fn default_lookup_ports() -> usize {
        defaults::LOOKUP_PORTS
    }

    /// Width of a queue index in bits, `ceil(log2(num_entries))`.
    pub const fn idx_bits(&self) -> u32 {
        if self.num_entries <= 1 {
            0
        } else {
            usize::BITS - (self.num_entries - 1).leading_zeros()
        }
    }

    /// Checks the queue shape against the model's limits.
    ///
    /// # Errors
    ///
    /// Returns the first violated bound as a [`ConfigError`].
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.num_entries < MIN_QUEUE_ENTRIES {
            return Err(ConfigError::TooFewEntries {
                min: MIN_QUEUE_ENTRIES,
                got: self.num_entries,
            });
        }
        if self.fetch_width == 0 || self.fetch_width > MAX_FETCH_WIDTH {
            return Err(ConfigError::FetchWidth {
                max: MAX_FETCH_WIDTH,
                got: self.fetch_width,
            });
        }
        if self.ghist_length == 0 || self.ghist_length > MAX_GHIST_LENGTH {
            return Err(ConfigError::HistoryLength {
                max: MAX_GHIST_LENGTH,
                got: self.ghist_length,
            });
        }
        if self.lookup_ports == 0 {
            return Err(ConfigError::NoLookupPorts);
        }
        Ok(())
    }
}

impl Default for FtqConfig {
    /// Creates a 16-entry, 4-wide queue with 64 bits of history and two lookup ports.
    fn default() -> Self {
        Self {
            num_entries: defaults::NUM_ENTRIES,
            fetch_width: defaults::FETCH_WIDTH,
            ghist_length: defaults::GHIST_LENGTH,
            lookup_ports: defaults::LOOKUP_PORTS,
        }
    }
}
