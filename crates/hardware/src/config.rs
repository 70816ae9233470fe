//! Configuration system for the Tomasulo simulator.
//!
//! This module defines all configuration structures used to parameterize the
//! simulated machine. It provides:
//! 1. **Defaults:** Baseline architecture constants (station counts, latencies, register count).
//! 2. **Structures:** Hierarchical config for general, station, latency, register, and bus settings.
//! 3. **Enums:** Common Data Bus arbitration policy.
//!
//! Configuration is supplied as JSON (see [`Config::from_json`]) or built from `Config::default()`.

use std::path::Path;

use serde::Deserialize;

use crate::common::SimError;
use crate::isa::{OpClass, OpKind};

/// Default configuration constants for the simulator.
///
/// These values describe the reference architecture when not explicitly
/// overridden in a JSON configuration.
mod defaults {
    /// Number of adder reservation stations (shared by ADD and SUB).
    pub const ADD_STATIONS: usize = 4;

    /// Number of multiplier reservation stations.
    pub const MULT_STATIONS: usize = 2;

    /// Number of divider reservation stations.
    pub const DIV_STATIONS: usize = 3;

    /// ADD/SUB execution latency in cycles.
    pub const ADD_LATENCY: u32 = 4;

    /// MULT execution latency in cycles.
    pub const MULT_LATENCY: u32 = 12;

    /// DIV execution latency in cycles.
    pub const DIV_LATENCY: u32 = 38;

    /// Number of architectural registers (`R0`-`R12`).
    pub const REGISTER_COUNT: usize = 13;
}

/// Common Data Bus arbitration policy.
///
/// Decides how many completed stations may broadcast their result in a single cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum CdbPolicy {
    /// Every station with a ready result broadcasts in the same cycle (unbounded bus width).
    #[default]
    BroadcastAll,
    /// One broadcast per cycle; among ready stations the oldest instruction in
    /// program order wins and the rest retry next cycle.
    Serialized,
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use tomasulo_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.stations.add, 4);
/// assert_eq!(config.latency.div, 38);
/// assert_eq!(config.registers.count, 13);
/// ```
///
/// Deserializing from JSON, with every omitted field taking its default:
///
/// ```
/// use tomasulo_core::config::{CdbPolicy, Config};
///
/// let json = r#"{
///     "general": { "max_cycles": 500 },
///     "stations": { "add": 2, "mult": 1, "div": 1 },
///     "latency": { "mult": 10 },
///     "registers": { "count": 4, "initial": [5000, 1, 2, 3] },
///     "cdb": { "policy": "Serialized" }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.general.max_cycles, Some(500));
/// assert_eq!(config.stations.add, 2);
/// assert_eq!(config.latency.add, 4);
/// assert_eq!(config.latency.mult, 10);
/// assert_eq!(config.registers.initial_values()[0], 5000);
/// assert_eq!(config.cdb.policy, CdbPolicy::Serialized);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Reservation station counts per class
    #[serde(default)]
    pub stations: StationConfig,
    /// Execution latency per class
    #[serde(default)]
    pub latency: LatencyConfig,
    /// Register file shape and initial contents
    #[serde(default)]
    pub registers: RegisterConfig,
    /// Common Data Bus settings
    #[serde(default)]
    pub cdb: CdbConfig,
}

impl Config {
    /// Decodes a configuration from JSON and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] if the JSON is malformed or a value is out of range.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] if the file cannot be read or decoded.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Checks value ranges that the type system cannot express.
    ///
    /// Station counts of zero are allowed here; they only become an error when
    /// a program actually needs that class (see [`crate::Engine::new`]).
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] describing the first violation.
    pub fn validate(&self) -> Result<(), SimError> {
        for class in OpClass::ALL {
            if self.latency.for_class(class) == 0 {
                return Err(SimError::InvalidConfig(format!(
                    "{class} latency must be at least 1 cycle"
                )));
            }
        }
        if self.registers.count == 0 {
            return Err(SimError::InvalidConfig(
                "register count must be at least 1".to_string(),
            ));
        }
        if let Some(initial) = &self.registers.initial {
            if initial.len() != self.registers.count {
                return Err(SimError::InvalidConfig(format!(
                    "{} initial register values given for {} registers",
                    initial.len(),
                    self.registers.count
                )));
            }
        }
        if self.general.max_cycles == Some(0) {
            return Err(SimError::InvalidConfig(
                "max_cycles must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GeneralConfig {
    /// Emit per-stage debug events through `tracing`
    #[serde(default)]
    pub trace: bool,

    /// Hard iteration cap for the driver loop; when absent it is derived
    /// from the program and latencies
    #[serde(default)]
    pub max_cycles: Option<u64>,
}

/// Reservation station counts per class.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StationConfig {
    /// Adder stations (ADD and SUB)
    #[serde(default = "StationConfig::default_add")]
    pub add: usize,

    /// Multiplier stations
    #[serde(default = "StationConfig::default_mult")]
    pub mult: usize,

    /// Divider stations
    #[serde(default = "StationConfig::default_div")]
    pub div: usize,
}

impl StationConfig {
    /// Returns the default adder station count.
    fn default_add() -> usize {
        defaults::ADD_STATIONS
    }

    /// Returns the default multiplier station count.
    fn default_mult() -> usize {
        defaults::MULT_STATIONS
    }

    /// Returns the default divider station count.
    fn default_div() -> usize {
        defaults::DIV_STATIONS
    }

    /// Station count for a class.
    pub const fn for_class(&self, class: OpClass) -> usize {
        match class {
            OpClass::Add => self.add,
            OpClass::Mult => self.mult,
            OpClass::Div => self.div,
        }
    }
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            add: defaults::ADD_STATIONS,
            mult: defaults::MULT_STATIONS,
            div: defaults::DIV_STATIONS,
        }
    }
}

/// Execution latency per class, in cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LatencyConfig {
    /// ADD/SUB latency
    #[serde(default = "LatencyConfig::default_add")]
    pub add: u32,

    /// MULT latency
    #[serde(default = "LatencyConfig::default_mult")]
    pub mult: u32,

    /// DIV latency
    #[serde(default = "LatencyConfig::default_div")]
    pub div: u32,
}

impl LatencyConfig {
    /// Returns the default ADD/SUB latency.
    fn default_add() -> u32 {
        defaults::ADD_LATENCY
    }

    /// Returns the default MULT latency.
    fn default_mult() -> u32 {
        defaults::MULT_LATENCY
    }

    /// Returns the default DIV latency.
    fn default_div() -> u32 {
        defaults::DIV_LATENCY
    }

    /// Latency for a station class.
    pub const fn for_class(&self, class: OpClass) -> u32 {
        match class {
            OpClass::Add => self.add,
            OpClass::Mult => self.mult,
            OpClass::Div => self.div,
        }
    }

    /// Latency for an operation kind.
    pub const fn for_op(&self, op: OpKind) -> u32 {
        self.for_class(op.class())
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            add: defaults::ADD_LATENCY,
            mult: defaults::MULT_LATENCY,
            div: defaults::DIV_LATENCY,
        }
    }
}

/// Register file configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterConfig {
    /// Number of architectural registers
    #[serde(default = "RegisterConfig::default_count")]
    pub count: usize,

    /// Initial register values; when absent register `i` starts at `i`
    #[serde(default)]
    pub initial: Option<Vec<i64>>,
}

impl RegisterConfig {
    /// Returns the default register count.
    fn default_count() -> usize {
        defaults::REGISTER_COUNT
    }

    /// Initial contents of the register file.
    pub fn initial_values(&self) -> Vec<i64> {
        self.initial
            .clone()
            .unwrap_or_else(|| (0..self.count as i64).collect())
    }
}

impl Default for RegisterConfig {
    fn default() -> Self {
        Self {
            count: defaults::REGISTER_COUNT,
            initial: None,
        }
    }
}

/// Common Data Bus configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CdbConfig {
    /// Arbitration policy
    #[serde(default)]
    pub policy: CdbPolicy,
}
