//! Snapshot Tests.

use crate::common::harness::TestContext;
use tomasulo_core::isa::{Instruction, OpKind};

#[test]
fn test_initial_snapshot() {
    let ctx = TestContext::new(&[Instruction::add(1, 2, 3)]);
    let snap = ctx.sim.snapshot();

    assert_eq!(snap.cycle, 0);
    assert_eq!(snap.registers.len(), 13);
    assert!(snap.register_status.iter().all(Option::is_none));
    assert_eq!(snap.stations.len(), 9);
    assert!(snap.stations.iter().all(|s| !s.busy));
    assert_eq!(snap.timings[0].timing.issue, None);
}

#[test]
fn test_snapshot_labels_producers() {
    let program = [Instruction::mult(1, 2, 3), Instruction::add(4, 1, 5)];
    let mut ctx = TestContext::new(&program);
    ctx.step(2);
    let snap = ctx.sim.snapshot();

    assert_eq!(snap.register_status[1].as_deref(), Some("Mult1"));
    assert_eq!(snap.register_status[4].as_deref(), Some("Add1"));

    let add1 = &snap.stations[0];
    assert_eq!(add1.name, "Add1");
    assert!(add1.busy);
    assert_eq!(add1.op, Some(OpKind::Add));
    assert_eq!(add1.qj.as_deref(), Some("Mult1"));
    assert_eq!(add1.vj, None);
    assert_eq!(add1.vk, Some(5));
    assert_eq!(add1.instruction, Some(1));

    let mult1 = &snap.stations[4];
    assert_eq!(mult1.elapsed, 2);
    assert!(!mult1.result_ready);
}

#[test]
fn test_snapshot_shows_ready_result() {
    let mut ctx = TestContext::new(&[Instruction::add(1, 2, 3)]);
    ctx.step(4);
    let row = &ctx.sim.snapshot().stations[0];
    assert!(row.result_ready);
    assert_eq!(row.result, Some(5));
}

#[test]
fn test_snapshot_json() {
    let mut ctx = TestContext::new(&[Instruction::add(1, 2, 3)]);
    ctx.step(1);
    let json: serde_json::Value = serde_json::from_str(&ctx.sim.snapshot().to_json().unwrap()).unwrap();

    assert_eq!(json["cycle"], 1);
    assert_eq!(json["register_status"][1], "Add1");
    assert_eq!(json["stations"][0]["op"], "ADD");
    assert_eq!(json["timings"][0]["issue"], 1);
    assert_eq!(json["timings"][0]["instruction"]["op"], "ADD");
    assert!(json["timings"][0]["writeback"].is_null());
}
