//! Simulator: the clock-driven loop around the engine.
//!
//! The simulator owns the engine and the iteration cap. Each iteration
//! advances the clock by one cycle (Issue, Execute, Writeback) until every
//! instruction has written back, a fault stops the run, or the cap is hit.

use tracing::info;

use crate::common::SimError;
use crate::config::{Config, LatencyConfig};
use crate::core::Engine;
use crate::isa::Instruction;
use crate::sim::snapshot::Snapshot;

/// Top-level simulator: engine state plus run bounds.
#[derive(Debug, Clone)]
pub struct Simulator {
    /// Scheduling engine (register file, status table, stations, clock).
    pub engine: Engine,
    max_cycles: u64,
}

impl Simulator {
    /// Creates a simulator for `program` on the architecture in `config`.
    ///
    /// The iteration cap is `general.max_cycles` when set, otherwise
    /// [`cycle_bound`] of the program.
    ///
    /// # Errors
    ///
    /// Propagates configuration and program validation errors from [`Engine::new`].
    pub fn new(config: &Config, program: Vec<Instruction>) -> Result<Self, SimError> {
        let max_cycles = config
            .general
            .max_cycles
            .unwrap_or_else(|| cycle_bound(&program, &config.latency));
        let engine = Engine::new(config, program)?;
        Ok(Self { engine, max_cycles })
    }

    /// Advances the simulator by one clock cycle.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::DivideByZero`] if an instruction faulted this cycle.
    pub fn tick(&mut self) -> Result<(), SimError> {
        self.engine.step()
    }

    /// Returns true once every instruction has written back.
    pub fn is_done(&self) -> bool {
        self.engine.is_done()
    }

    /// Iteration cap for [`Simulator::run`].
    pub fn max_cycles(&self) -> u64 {
        self.max_cycles
    }

    /// Read-only snapshot of the current end-of-cycle state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.engine)
    }

    /// Runs until every instruction retires and returns the final cycle count.
    ///
    /// # Errors
    ///
    /// - [`SimError::DivideByZero`] if an instruction faults.
    /// - [`SimError::CycleLimitExceeded`] if the cap is reached first.
    pub fn run(&mut self) -> Result<u64, SimError> {
        self.run_with(|_| {})
    }

    /// Runs until every instruction retires, calling `observe` with the engine
    /// after every cycle.
    ///
    /// The observer also sees the cycle in which a fault was raised before the
    /// error is returned.
    ///
    /// # Errors
    ///
    /// Same as [`Simulator::run`].
    pub fn run_with<F>(&mut self, mut observe: F) -> Result<u64, SimError>
    where
        F: FnMut(&Engine),
    {
        while !self.engine.is_done() {
            if self.engine.cycle() >= self.max_cycles {
                return Err(SimError::CycleLimitExceeded {
                    limit: self.max_cycles,
                    retired: self.engine.retired(),
                    total: self.engine.program().len(),
                });
            }
            let result = self.engine.step();
            observe(&self.engine);
            result?;
        }

        info!(
            cycles = self.engine.cycle(),
            instructions = self.engine.program().len(),
            "all instructions retired"
        );
        Ok(self.engine.cycle())
    }
}

/// Upper bound on the cycles any schedule of `program` can take.
///
/// Once every earlier instruction has written back, an instruction issues
/// within a cycle, executes for its latency and broadcasts the cycle after,
/// so `latency + 2` per instruction always suffices. Programs that need a
/// class with no stations never reach the driver loop.
pub fn cycle_bound(program: &[Instruction], latency: &LatencyConfig) -> u64 {
    program
        .iter()
        .map(|inst| u64::from(latency.for_op(inst.op)) + 2)
        .fold(1, u64::saturating_add)
}
