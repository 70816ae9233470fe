//! End-of-cycle state snapshots.
//!
//! A [`Snapshot`] is a plain, owned copy of everything an observer may want to
//! render after a cycle: register contents, the register status table, the
//! reservation-station table, and the per-instruction timing rows. Station tags
//! are rendered as station labels (`Add1`, `Mult2`, ...). Snapshots derive
//! `Serialize` so they can be streamed as JSON.

use serde::Serialize;

use crate::core::Engine;
use crate::core::pipeline::station::{Outcome, StationId};
use crate::isa::{Instruction, InstructionTiming, OpKind};

/// One row of the reservation-station table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StationRow {
    /// Station label.
    pub name: String,
    /// Station is holding an instruction.
    pub busy: bool,
    /// Operation of the occupying instruction.
    pub op: Option<OpKind>,
    /// First operand value, once resolved.
    pub vj: Option<i64>,
    /// Second operand value, once resolved.
    pub vk: Option<i64>,
    /// Producer of the first operand, while pending.
    pub qj: Option<String>,
    /// Producer of the second operand, while pending.
    pub qk: Option<String>,
    /// Elapsed execution cycles.
    pub elapsed: u32,
    /// Result waiting for the bus.
    pub result: Option<i64>,
    /// Result is ready for broadcast.
    pub result_ready: bool,
    /// Execution faulted; the station will never broadcast.
    pub faulted: bool,
    /// Program index of the occupying instruction.
    pub instruction: Option<usize>,
}

/// One row of the instruction timing table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TimingRow {
    /// Program index.
    pub index: usize,
    /// The instruction.
    pub instruction: Instruction,
    /// Recorded event cycles.
    #[serde(flatten)]
    pub timing: InstructionTiming,
}

/// Read-only copy of the machine state at the end of a cycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Cycle this snapshot was taken after.
    pub cycle: u64,
    /// Register file contents.
    pub registers: Vec<i64>,
    /// Pending producer per register, as a station label.
    pub register_status: Vec<Option<String>>,
    /// Reservation-station table.
    pub stations: Vec<StationRow>,
    /// Instruction timing table.
    pub timings: Vec<TimingRow>,
}

impl Snapshot {
    /// Copies the current state out of `engine`.
    pub fn capture(engine: &Engine) -> Self {
        let pool = engine.stations();
        let label = |tag: StationId| pool.get(tag).name();

        let stations = pool
            .iter()
            .map(|(_, station)| match &station.entry {
                None => StationRow {
                    name: station.name(),
                    busy: false,
                    op: None,
                    vj: None,
                    vk: None,
                    qj: None,
                    qk: None,
                    elapsed: 0,
                    result: None,
                    result_ready: false,
                    faulted: false,
                    instruction: None,
                },
                Some(entry) => StationRow {
                    name: station.name(),
                    busy: true,
                    op: Some(entry.op),
                    vj: entry.j.value(),
                    vk: entry.k.value(),
                    qj: entry.j.producer().map(label),
                    qk: entry.k.producer().map(label),
                    elapsed: entry.elapsed,
                    result: entry.result(),
                    result_ready: entry.result().is_some(),
                    faulted: matches!(entry.outcome, Some(Outcome::Faulted { .. })),
                    instruction: Some(entry.inst),
                },
            })
            .collect();

        let timings = engine
            .program()
            .iter()
            .zip(engine.timings())
            .enumerate()
            .map(|(index, (&instruction, &timing))| TimingRow {
                index,
                instruction,
                timing,
            })
            .collect();

        Self {
            cycle: engine.cycle(),
            registers: engine.registers().to_vec(),
            register_status: engine
                .register_status()
                .iter()
                .map(|p| p.map(label))
                .collect(),
            stations,
            timings,
        }
    }

    /// Serializes the snapshot as a single line of JSON.
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` serialization errors.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
