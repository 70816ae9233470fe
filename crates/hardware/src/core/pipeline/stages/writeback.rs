//! Writeback (WB) Stage: the Common Data Bus.
//!
//! This module implements the final stage of the pipeline. A station whose
//! result became ready in an earlier cycle broadcasts `(tag, value)`, and the
//! broadcast is observed in the same step by:
//! 1. **Register File:** every register whose status names the tag takes the value.
//! 2. **Reservation Stations:** every operand waiting on the tag is resolved.
//! 3. **The Station Itself:** it is freed for the issue stage of the next cycle.
//!
//! The set of broadcasting stations is chosen before any broadcast is
//! applied, so the outcome does not depend on station order.

use tracing::{debug, trace};

use crate::config::CdbPolicy;
use crate::core::Engine;
use crate::core::pipeline::station::{Outcome, StationId};

/// A result on the bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Broadcast {
    tag: StationId,
    inst: usize,
    value: i64,
}

/// Executes the writeback stage.
///
/// # Arguments
///
/// * `engine` - Mutable reference to the engine state
///
/// # Behavior
///
/// - Selects stations whose result was computed before this cycle
/// - Under [`CdbPolicy::Serialized`], keeps only the oldest instruction and
///   defers the rest
/// - Writes registers, forwards to waiting stations, frees the station, and
///   records the writeback cycle
pub fn wb_stage(engine: &mut Engine) {
    let cycle = engine.cycle;

    let mut ready: Vec<Broadcast> = engine
        .pool
        .busy()
        .filter_map(|(tag, entry)| match entry.outcome {
            Some(Outcome::Ready { value, cycle: done }) if done < cycle => Some(Broadcast {
                tag,
                inst: entry.inst,
                value,
            }),
            _ => None,
        })
        .collect();

    if engine.cdb_policy == CdbPolicy::Serialized && ready.len() > 1 {
        ready.sort_by_key(|b| b.inst);
        let deferred = ready.len() - 1;
        engine.stats.cdb_conflicts += deferred as u64;
        trace!(cycle, deferred, "WB  bus busy");
        ready.truncate(1);
    }

    for broadcast in ready {
        apply(engine, broadcast);
    }
}

fn apply(engine: &mut Engine, Broadcast { tag, inst, value }: Broadcast) {
    let cycle = engine.cycle;

    let written = engine.status.resolve(tag);
    for &reg in &written {
        engine.regs.write(reg, value);
    }
    let forwarded = engine.pool.forward(tag, value);

    let _ = engine.timings[inst].writeback.get_or_insert(cycle);
    let station = engine.pool.get(tag).name();
    if let Some(entry) = engine.pool.release(tag) {
        engine.stats.record_retire(entry.op);
    }
    engine.retired += 1;
    engine.stats.cdb_broadcasts += 1;

    debug!(
        cycle,
        index = inst,
        %station,
        "WB  {value} -> regs {written:?}, {forwarded} waiting operand(s)"
    );
}
