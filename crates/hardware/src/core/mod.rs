//! Core scheduling implementation.
//!
//! This module contains the Tomasulo engine: the reservation stations, the
//! register status table, and the three pipeline stages that advance them.

/// Tomasulo pipeline (stations, register status, stages, engine).
pub mod pipeline;

pub use self::pipeline::engine::Engine;
