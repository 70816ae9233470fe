//! Simulator error definitions.
//!
//! This module defines every failure the simulator can report. It provides:
//! 1. **Input Errors:** Malformed program text and out-of-range register operands.
//! 2. **Configuration Errors:** Impossible architectures, such as a program that needs a
//!    reservation-station class with zero stations.
//! 3. **Execution Faults:** Arithmetic domain errors raised by a single instruction.
//! 4. **Run Bounds:** The driver's iteration cap being reached before every instruction retired.
//!
//! A full reservation-station partition is not an error; the issue stage simply stalls.

use thiserror::Error;

use crate::isa::OpClass;

/// Errors reported by program construction, configuration, and the driver loop.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SimError {
    /// An instruction names a register outside the configured register file.
    #[error("instruction {instruction} references R{register}, but only {count} registers exist")]
    InvalidRegister {
        /// Program index of the offending instruction.
        instruction: usize,
        /// Register index that is out of range.
        register: usize,
        /// Configured register count.
        count: usize,
    },

    /// An instruction needs a station class that has no stations, so it could never issue.
    #[error("instruction {instruction} needs a {class} reservation station, but none are configured")]
    NoStations {
        /// Program index of the first instruction that needs the class.
        instruction: usize,
        /// The empty station class.
        class: OpClass,
    },

    /// A configuration value is out of range or could not be decoded.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A DIV instruction found a zero divisor when its latency expired.
    ///
    /// The faulting station never broadcasts, so no register or waiting station
    /// observes a bogus value.
    #[error("instruction {instruction} divided by zero in cycle {cycle}")]
    DivideByZero {
        /// Program index of the faulting instruction.
        instruction: usize,
        /// Cycle in which the fault was detected.
        cycle: u64,
    },

    /// The driver reached its iteration cap with instructions still in flight.
    #[error("simulation did not finish within {limit} cycles ({retired}/{total} instructions retired)")]
    CycleLimitExceeded {
        /// The configured cap.
        limit: u64,
        /// Instructions that had written back when the cap was hit.
        retired: usize,
        /// Program length.
        total: usize,
    },

    /// Program text could not be parsed.
    #[error("line {line}: {reason}")]
    Parse {
        /// 1-based source line.
        line: usize,
        /// Human-readable description of the problem.
        reason: String,
    },
}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}

impl From<std::io::Error> for SimError {
    fn from(err: std::io::Error) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}
