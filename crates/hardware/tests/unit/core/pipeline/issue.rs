//! Issue Stage Unit Tests.
//!
//! Verifies that issue:
//!   1. Places the oldest unissued instruction in the lowest free station of its class
//!   2. Captures ready sources as values and pending sources as producer tags
//!   3. Reads sources before renaming the destination
//!   4. Stalls in order when the class partition is full

use crate::common::harness::TestContext;
use tomasulo_core::core::pipeline::station::{Operand, StationId};
use tomasulo_core::isa::Instruction;

#[test]
fn test_first_instruction_issues_in_cycle_one() {
    let mut ctx = TestContext::new(&[Instruction::add(1, 2, 3)]);
    ctx.step(1);

    assert_eq!(ctx.timing(0).issue, Some(1));
    assert_eq!(ctx.engine().issued(), 1);

    let entry = ctx.engine().stations().entry(StationId(0)).unwrap();
    assert_eq!(entry.j, Operand::Ready(2));
    assert_eq!(entry.k, Operand::Ready(3));
    assert_eq!(ctx.engine().register_status()[1], Some(StationId(0)));
}

#[test]
fn test_one_instruction_per_cycle() {
    let program = [
        Instruction::add(1, 2, 3),
        Instruction::mult(4, 5, 6),
        Instruction::div(7, 8, 9),
    ];
    let mut ctx = TestContext::new(&program);
    for cycle in 1..=3 {
        ctx.step(1);
        assert_eq!(ctx.engine().issued() as u64, cycle);
    }
    assert_eq!(ctx.events(1).0, 2);
    assert_eq!(ctx.events(2).0, 3);
}

#[test]
fn test_class_partitions() {
    let program = [
        Instruction::mult(1, 2, 3),
        Instruction::sub(4, 5, 6),
        Instruction::div(7, 8, 9),
    ];
    let mut ctx = TestContext::new(&program);
    ctx.step(3);

    let status = ctx.engine().register_status();
    assert_eq!(status[1], Some(StationId(4)));
    assert_eq!(status[4], Some(StationId(0)));
    assert_eq!(status[7], Some(StationId(6)));
}

#[test]
fn test_pending_operand_names_producer() {
    let program = [Instruction::add(1, 2, 3), Instruction::add(4, 1, 5)];
    let mut ctx = TestContext::new(&program);
    ctx.step(2);

    let entry = ctx.engine().stations().entry(StationId(1)).unwrap();
    assert_eq!(entry.j, Operand::Pending(StationId(0)));
    assert_eq!(entry.k, Operand::Ready(5));
}

#[test]
fn test_sources_read_before_destination_rename() {
    let program = [Instruction::add(1, 1, 2), Instruction::add(3, 1, 1)];
    let mut ctx = TestContext::new(&program);
    ctx.step(2);

    let first = ctx.engine().stations().entry(StationId(0)).unwrap();
    assert_eq!(first.j, Operand::Ready(1));

    let second = ctx.engine().stations().entry(StationId(1)).unwrap();
    assert_eq!(second.j, Operand::Pending(StationId(0)));
    assert_eq!(second.k, Operand::Pending(StationId(0)));
}

#[test]
fn test_waw_last_writer_owns_register() {
    let program = [Instruction::add(1, 2, 3), Instruction::mult(1, 2, 3)];
    let mut ctx = TestContext::new(&program);
    ctx.step(2);
    assert_eq!(ctx.engine().register_status()[1], Some(StationId(4)));
}

#[test]
fn test_structural_stall_when_partition_full() {
    let program = [
        Instruction::add(1, 2, 3),
        Instruction::add(4, 5, 6),
        Instruction::add(7, 8, 9),
        Instruction::add(10, 11, 12),
        Instruction::add(0, 2, 3),
    ];
    let mut ctx = TestContext::new(&program);

    ctx.step(5);
    assert_eq!(ctx.engine().issued(), 4);
    assert_eq!(ctx.timing(4).issue, None);
    assert_eq!(ctx.engine().stats.structural_stalls, 1);

    // Add1 was freed by the broadcast in cycle 5.
    ctx.step(1);
    assert_eq!(ctx.timing(4).issue, Some(6));
    assert_eq!(ctx.engine().stations().entry(StationId(0)).unwrap().inst, 4);
}

#[test]
fn test_stall_blocks_younger_instructions() {
    let program = [
        Instruction::mult(1, 2, 3),
        Instruction::mult(4, 5, 6),
        Instruction::mult(7, 8, 9),
        Instruction::add(10, 11, 12),
    ];
    let mut ctx = TestContext::new(&program);
    ctx.step(10);

    // Adder stations are free, but the ADD is behind a stalled MULT.
    assert_eq!(ctx.engine().issued(), 2);
    assert_eq!(ctx.timing(3).issue, None);
    assert_eq!(ctx.engine().stats.structural_stalls, 8);
}
