//! Scheduling engine.
//!
//! The engine owns every piece of mutable machine state and advances it one
//! clock cycle at a time:
//! 1. **Issue** admits the next instruction in program order into a free station.
//! 2. **Execute** advances the latency counter of every station whose operands are resolved.
//! 3. **Writeback** broadcasts finished results on the Common Data Bus and frees their stations.
//!
//! The stages always run in that order and each runs exactly once per cycle,
//! so a value broadcast in cycle `t` is first visible to Issue and Execute in
//! cycle `t + 1`.

use tracing::debug;

use crate::common::{RegisterFile, SimError};
use crate::config::{CdbPolicy, Config, LatencyConfig};
use crate::core::pipeline::scoreboard::Scoreboard;
use crate::core::pipeline::stages::{execute_stage, issue_stage, wb_stage};
use crate::core::pipeline::station::{StationId, StationPool};
use crate::isa::{Instruction, InstructionTiming};
use crate::stats::SimStats;

/// Tomasulo scheduling engine.
#[derive(Debug, Clone)]
pub struct Engine {
    /// Program, in issue order.
    pub(crate) program: Vec<Instruction>,
    /// Timing record per instruction, parallel to `program`.
    pub(crate) timings: Vec<InstructionTiming>,
    /// Architectural register file.
    pub(crate) regs: RegisterFile,
    /// Register status table.
    pub(crate) status: Scoreboard,
    /// Reservation stations.
    pub(crate) pool: StationPool,
    /// Execution latency per class.
    pub(crate) latency: LatencyConfig,
    /// Common Data Bus arbitration.
    pub(crate) cdb_policy: CdbPolicy,
    /// Index of the next instruction to issue.
    pub(crate) next_issue: usize,
    /// Current clock cycle; 0 before the first step.
    pub(crate) cycle: u64,
    /// Instructions that have written back.
    pub(crate) retired: usize,
    /// Fault raised by the execute stage in the current cycle.
    pub(crate) fault: Option<SimError>,
    /// Performance counters.
    pub stats: SimStats,
}

impl Engine {
    /// Builds an engine for `program` on the architecture described by `config`.
    ///
    /// # Errors
    ///
    /// - [`SimError::InvalidConfig`] if the configuration is out of range.
    /// - [`SimError::InvalidRegister`] if an instruction names a register the
    ///   register file does not have.
    /// - [`SimError::NoStations`] if an instruction needs a station class with
    ///   zero stations, since it could never issue.
    pub fn new(config: &Config, program: Vec<Instruction>) -> Result<Self, SimError> {
        config.validate()?;

        let count = config.registers.count;
        for (i, inst) in program.iter().enumerate() {
            let register = inst.max_register();
            if register >= count {
                return Err(SimError::InvalidRegister {
                    instruction: i,
                    register,
                    count,
                });
            }
            let class = inst.op.class();
            if config.stations.for_class(class) == 0 {
                return Err(SimError::NoStations {
                    instruction: i,
                    class,
                });
            }
        }

        let timings = vec![InstructionTiming::default(); program.len()];
        Ok(Self {
            program,
            timings,
            regs: RegisterFile::from_values(config.registers.initial_values()),
            status: Scoreboard::new(count),
            pool: StationPool::new(
                config.stations.add,
                config.stations.mult,
                config.stations.div,
            ),
            latency: config.latency,
            cdb_policy: config.cdb.policy,
            next_issue: 0,
            cycle: 0,
            retired: 0,
            fault: None,
            stats: SimStats::default(),
        })
    }

    /// Advances the machine by one clock cycle: Issue, Execute, Writeback.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::DivideByZero`] if a DIV finished with a zero divisor
    /// this cycle. All three stages still ran, so the state left behind is a
    /// consistent end-of-cycle state; the faulted station simply never broadcasts.
    pub fn step(&mut self) -> Result<(), SimError> {
        self.cycle += 1;
        self.stats.cycles = self.cycle;

        issue_stage(self);
        execute_stage(self);
        wb_stage(self);

        debug!(
            cycle = self.cycle,
            busy = self.pool.busy_count(),
            retired = self.retired,
            "cycle complete"
        );

        match self.fault.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Returns true once every instruction has written back.
    pub fn is_done(&self) -> bool {
        self.retired == self.program.len()
    }

    /// Current clock cycle (0 before the first step).
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// The program, in issue order.
    pub fn program(&self) -> &[Instruction] {
        &self.program
    }

    /// Per-instruction timing records, parallel to [`Engine::program`].
    pub fn timings(&self) -> &[InstructionTiming] {
        &self.timings
    }

    /// Register file contents.
    pub fn registers(&self) -> &[i64] {
        self.regs.as_slice()
    }

    /// Register status table: pending producer per register.
    pub fn register_status(&self) -> &[Option<StationId>] {
        self.status.as_slice()
    }

    /// Reservation stations.
    pub fn stations(&self) -> &StationPool {
        &self.pool
    }

    /// Number of instructions already issued.
    pub fn issued(&self) -> usize {
        self.next_issue
    }

    /// Number of instructions that have written back.
    pub fn retired(&self) -> usize {
        self.retired
    }
}
