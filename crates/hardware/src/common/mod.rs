//! Common utilities and types used throughout the simulator.
//!
//! This module provides the building blocks shared by every component:
//! 1. **Error Handling:** The `SimError` taxonomy for configuration, input, and arithmetic faults.
//! 2. **Register Management:** The flat integer register file written by the Common Data Bus.

/// Error types for configuration, program input, and execution faults.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use error::SimError;
pub use reg::RegisterFile;
