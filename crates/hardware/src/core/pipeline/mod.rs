//! Tomasulo pipeline implementation.
//!
//! This module contains the scheduling machinery. It includes the following components:
//! 1. **Stations:** The partitioned reservation-station pool and its renaming tags.
//! 2. **Scoreboard:** The register status table mapping registers to pending producers.
//! 3. **Stages:** Issue, Execute, and Writeback.
//! 4. **Engine:** The owner of all machine state that runs the stages once per cycle.

/// Scheduling engine driving the stages.
pub mod engine;

/// Register status table.
pub mod scoreboard;

/// Pipeline stage implementations (issue, execute, writeback).
pub mod stages;

/// Reservation stations, operands, and tags.
pub mod station;
