//! Instruction set definitions.
//!
//! The simulated machine understands four register-register arithmetic
//! operations. This module provides:
//! 1. **Operations:** `OpKind` and the reservation-station class each kind issues to.
//! 2. **Instructions:** Decoded instructions and their per-instruction timing record.
//! 3. **Parsing:** A line-oriented text format (`ADD R1, R2, R3`) for programs.

/// Operation kinds, station classes, instructions, and timing records.
pub mod instruction;

/// Program text parser.
pub mod parse;

pub use instruction::{Instruction, InstructionTiming, OpClass, OpKind};
pub use parse::parse_program;
