//! Simulation driver and observability.
//!
//! Provides the clock-driven run loop around the engine and the read-only
//! snapshots that presentation code consumes after each cycle.

/// Driver loop with termination detection and an iteration cap.
pub mod simulator;

/// End-of-cycle state snapshots.
pub mod snapshot;

pub use simulator::{Simulator, cycle_bound};
pub use snapshot::{Snapshot, StationRow, TimingRow};
