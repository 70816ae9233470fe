//! Tomasulo dynamic scheduling simulator library.
//!
//! This crate implements a cycle-stepped model of Tomasulo's algorithm with the following:
//! 1. **Core:** Reservation-station pool, register status table, and the
//!    Issue / Execute / Writeback stages driven once per clock cycle.
//! 2. **ISA:** Four arithmetic operation kinds (ADD, SUB, MULT, DIV) over a flat integer register file.
//! 3. **Simulation:** Driver loop with an iteration cap, read-only per-cycle snapshots, and statistics.
//! 4. **Configuration:** Station counts, per-class latencies, register file shape, and bus policy.

/// Common types (error taxonomy, register file).
pub mod common;
/// Simulator configuration (defaults, bus policy, hierarchical config structures).
pub mod config;
/// Scheduling engine (reservation stations, register status, pipeline stages).
pub mod core;
/// Instruction set (operation kinds, instructions, program text parsing).
pub mod isa;
/// Driver loop and state snapshots.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Error type returned by every fallible operation in this crate.
pub use crate::common::SimError;
/// The scheduling engine; owns every piece of mutable architectural state.
pub use crate::core::Engine;
/// Top-level driver that runs an engine to completion.
pub use crate::sim::Simulator;
