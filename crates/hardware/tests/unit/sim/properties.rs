//! Randomized Scheduling Invariants.
//!
//! Random straight-line programs over all four operations are run on random
//! machine shapes. DIV always divides by R12, which no instruction writes, so
//! it never faults. Whatever the schedule, the final register file must match
//! a sequential in-order evaluation, and every timing record must be
//! internally consistent.
#![allow(unused_results)]

use proptest::prelude::*;

use tomasulo_core::Simulator;
use tomasulo_core::config::{CdbPolicy, Config};
use tomasulo_core::isa::{Instruction, OpKind};

const REGS: usize = 13;

/// Holds its initial value (12) for the whole run; the only DIV divisor.
const DIVISOR: usize = REGS - 1;

fn arb_inst() -> impl Strategy<Value = Instruction> {
    prop_oneof![
        3 => (
            prop_oneof![Just(OpKind::Add), Just(OpKind::Sub), Just(OpKind::Mult)],
            0..DIVISOR,
            0..REGS,
            0..REGS,
        )
            .prop_map(|(op, rd, rs1, rs2)| Instruction::new(op, rd, rs1, rs2)),
        1 => (0..DIVISOR, 0..REGS)
            .prop_map(|(rd, rs1)| Instruction::new(OpKind::Div, rd, rs1, DIVISOR)),
    ]
}

fn arb_config() -> impl Strategy<Value = Config> {
    (
        (1usize..=4, 1usize..=3, 1usize..=3),
        (1u32..=5, 1u32..=8, 1u32..=12),
        any::<bool>(),
    )
        .prop_map(|((add, mult, div), (add_lat, mult_lat, div_lat), serialized)| {
            let mut config = Config::default();
            config.stations.add = add;
            config.stations.mult = mult;
            config.stations.div = div;
            config.latency.add = add_lat;
            config.latency.mult = mult_lat;
            config.latency.div = div_lat;
            if serialized {
                config.cdb.policy = CdbPolicy::Serialized;
            }
            config
        })
}

fn sequential(program: &[Instruction]) -> Vec<i64> {
    let mut regs: Vec<i64> = (0..REGS as i64).collect();
    for inst in program {
        let (a, b) = (regs[inst.rs1], regs[inst.rs2]);
        regs[inst.rd] = match inst.op {
            OpKind::Add => a.wrapping_add(b),
            OpKind::Sub => a.wrapping_sub(b),
            OpKind::Mult => a.wrapping_mul(b),
            OpKind::Div => a.wrapping_div(b),
        };
    }
    regs
}

proptest! {
    #[test]
    fn prop_matches_sequential_evaluation(
        program in prop::collection::vec(arb_inst(), 1..16),
        config in arb_config(),
    ) {
        let mut sim = Simulator::new(&config, program.clone()).unwrap();
        sim.run().unwrap();
        let expected = sequential(&program);
        prop_assert_eq!(sim.engine.registers(), expected.as_slice());
        prop_assert!(sim.engine.register_status().iter().all(Option::is_none));
        prop_assert_eq!(sim.engine.stations().busy_count(), 0);
    }

    #[test]
    fn prop_timing_records_consistent(
        program in prop::collection::vec(arb_inst(), 1..16),
        config in arb_config(),
    ) {
        let mut sim = Simulator::new(&config, program.clone()).unwrap();
        let cycles = sim.run().unwrap();

        let mut last_issue = 0;
        let mut last_wb = 0;
        for (inst, t) in program.iter().zip(sim.engine.timings()) {
            let issue = t.issue.unwrap();
            let begin = t.execute_begin.unwrap();
            let end = t.execute_end.unwrap();
            let wb = t.writeback.unwrap();

            prop_assert!(issue > last_issue, "issue is strictly in program order");
            prop_assert!(issue <= begin);
            prop_assert_eq!(end - begin + 1, u64::from(config.latency.for_op(inst.op)));
            prop_assert!(wb > end);
            last_issue = issue;
            last_wb = last_wb.max(wb);
        }
        prop_assert_eq!(cycles, last_wb);
    }

    #[test]
    fn prop_serialized_bus_one_broadcast_per_cycle(
        program in prop::collection::vec(arb_inst(), 1..16),
        config in arb_config(),
    ) {
        let mut config = config;
        config.cdb.policy = CdbPolicy::Serialized;
        let mut sim = Simulator::new(&config, program).unwrap();
        sim.run().unwrap();

        let mut wbs: Vec<u64> = sim.engine.timings().iter().filter_map(|t| t.writeback).collect();
        let n = wbs.len();
        wbs.sort_unstable();
        wbs.dedup();
        prop_assert_eq!(wbs.len(), n);
    }

    #[test]
    fn prop_counters_agree_with_timings(
        program in prop::collection::vec(arb_inst(), 0..16),
        config in arb_config(),
    ) {
        let mut sim = Simulator::new(&config, program.clone()).unwrap();
        sim.run().unwrap();
        let stats = &sim.engine.stats;

        prop_assert_eq!(stats.instructions_issued, program.len() as u64);
        prop_assert_eq!(stats.instructions_retired, program.len() as u64);
        prop_assert_eq!(stats.cdb_broadcasts, program.len() as u64);
        let busy: u64 = program.iter().map(|i| u64::from(config.latency.for_op(i.op))).sum();
        prop_assert_eq!(stats.execute_cycles, busy);
    }

    #[test]
    fn prop_station_backs_at_most_one_instruction(
        program in prop::collection::vec(arb_inst(), 1..16),
        config in arb_config(),
    ) {
        let mut sim = Simulator::new(&config, program).unwrap();
        let mut duplicated = false;
        sim.run_with(|engine| {
            let mut insts: Vec<usize> = engine.stations().busy().map(|(_, e)| e.inst).collect();
            let n = insts.len();
            insts.sort_unstable();
            insts.dedup();
            duplicated |= insts.len() != n;
        })
        .unwrap();
        prop_assert!(!duplicated);
    }
}
