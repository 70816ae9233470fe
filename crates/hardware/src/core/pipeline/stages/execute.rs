//! Execute (EX) Stage.
//!
//! This module advances every busy station by one cycle. It performs the following:
//! 1. **Readiness:** Only stations with both operands resolved and no result yet do any work.
//! 2. **Latency:** Each such station advances its own latency counter; stations never
//!    contend for a shared functional unit.
//! 3. **Completion:** When the counter reaches the class latency the result is computed and
//!    held for the Common Data Bus.
//!
//! Every station only touches its own entry and its own instruction's timing
//! record, so the sweep order cannot leak state between stations.

use tracing::{debug, warn};

use crate::common::SimError;
use crate::core::Engine;
use crate::core::pipeline::station::{Operand, Outcome, StationId};
use crate::isa::OpKind;

/// Executes the execute stage.
///
/// # Arguments
///
/// * `engine` - Mutable reference to the engine state.
pub fn execute_stage(engine: &mut Engine) {
    let cycle = engine.cycle;

    for i in 0..engine.pool.len() {
        let tag = StationId(i);
        let Some(entry) = engine.pool.entry_mut(tag) else {
            continue;
        };

        if entry.outcome.is_some() {
            continue;
        }
        let (Operand::Ready(a), Operand::Ready(b)) = (entry.j, entry.k) else {
            engine.stats.operand_wait_cycles += 1;
            continue;
        };

        let timing = &mut engine.timings[entry.inst];
        let _ = timing.execute_begin.get_or_insert(cycle);

        entry.elapsed += 1;
        engine.stats.execute_cycles += 1;
        if entry.elapsed < engine.latency.for_op(entry.op) {
            continue;
        }

        entry.elapsed = 0;
        timing.execute_end = Some(cycle);

        let (inst, op) = (entry.inst, entry.op);
        let outcome = alu(op, a, b).map_or(Outcome::Faulted { cycle }, |value| Outcome::Ready {
            value,
            cycle,
        });
        entry.outcome = Some(outcome);

        let station = engine.pool.get(tag).name();
        match outcome {
            Outcome::Ready { value, .. } => {
                debug!(cycle, index = inst, %station, "EX  {a} {} {b} = {value}", op.symbol());
            }
            Outcome::Faulted { .. } => {
                warn!(cycle, index = inst, %station, "EX  DIV {a}, {b}: divide by zero");
                engine.stats.faults += 1;
                if engine.fault.is_none() {
                    engine.fault = Some(SimError::DivideByZero {
                        instruction: inst,
                        cycle,
                    });
                }
            }
        }
    }
}

/// Computes `a op b`.
///
/// ADD, SUB, and MULT wrap on overflow. DIV truncates toward zero and returns
/// `None` for a zero divisor; `i64::MIN / -1` wraps to `i64::MIN`.
pub fn alu(op: OpKind, a: i64, b: i64) -> Option<i64> {
    match op {
        OpKind::Add => Some(a.wrapping_add(b)),
        OpKind::Sub => Some(a.wrapping_sub(b)),
        OpKind::Mult => Some(a.wrapping_mul(b)),
        OpKind::Div => (b != 0).then(|| a.wrapping_div(b)),
    }
}
