//! Issue (IS) Stage.
//!
//! Single-issue, in-order admission into the reservation stations. Each cycle
//! the stage looks at exactly one instruction, the oldest not yet issued:
//! - If its class partition has no free station, nothing changes (structural
//!   stall) and the same instruction is retried next cycle. Younger
//!   instructions never bypass it.
//! - Otherwise it takes the lowest-indexed free station, captures each source
//!   operand as a value or a producer tag, and renames its destination to
//!   that station.

use tracing::{debug, trace};

use crate::core::Engine;
use crate::core::pipeline::scoreboard::Scoreboard;
use crate::core::pipeline::station::{Operand, StationEntry, StationPool};
use crate::common::RegisterFile;

/// Executes the issue stage.
///
/// Does nothing once the program is exhausted. A structural stall is counted
/// in `structural_stalls` and leaves `next_issue` unchanged.
///
/// # Arguments
///
/// * `engine` - Mutable reference to the engine state.
pub fn issue_stage(engine: &mut Engine) {
    let idx = engine.next_issue;
    let Some(&inst) = engine.program.get(idx) else {
        return;
    };
    let class = inst.op.class();

    let Some(tag) = engine.pool.first_free(class) else {
        engine.stats.structural_stalls += 1;
        trace!(
            cycle = engine.cycle,
            index = idx,
            %class,
            "IS  stall: no free station"
        );
        return;
    };

    // Sources are captured before the destination is renamed, so an
    // instruction that reads its own destination sees the previous producer.
    let j = read_operand(inst.rs1, &engine.status, &engine.regs, &engine.pool);
    let k = read_operand(inst.rs2, &engine.status, &engine.regs, &engine.pool);

    engine
        .pool
        .occupy(tag, StationEntry::new(idx, inst.op, inst.rd, j, k));
    engine.status.set_producer(inst.rd, tag);

    debug_assert!(engine.timings[idx].issue.is_none());
    engine.timings[idx].issue = Some(engine.cycle);
    engine.next_issue += 1;
    engine.stats.instructions_issued += 1;

    debug!(
        cycle = engine.cycle,
        index = idx,
        station = %engine.pool.get(tag).name(),
        "IS  {inst} j={j:?} k={k:?}"
    );
}

/// Captures a source operand at issue time.
///
/// With no pending producer the register value is copied (snapshot
/// semantics: later register writes do not reach this station). Otherwise
/// the producer's tag is recorded and the value arrives by broadcast.
fn read_operand(
    reg: usize,
    status: &Scoreboard,
    regs: &RegisterFile,
    pool: &StationPool,
) -> Operand {
    match status.get_producer(reg) {
        None => Operand::Ready(regs.read(reg)),
        Some(tag) => {
            debug_assert!(
                pool.get(tag).is_busy(),
                "R{reg} names idle producer {}",
                pool.get(tag).name()
            );
            Operand::Pending(tag)
        }
    }
}
