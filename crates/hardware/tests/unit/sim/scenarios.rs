//! Whole-Program Timing Scenarios.
//!
//! Each scenario pins the full timing table of a short program on the
//! default machine (4 adder, 2 multiplier, 3 divider stations; latencies
//! 4/12/38; register `Ri` starts at `i`).

use pretty_assertions::assert_eq;

use crate::common::harness::TestContext;
use tomasulo_core::isa::Instruction;

const DEMO: &str = "
ADD  R1, R2, R3
ADD  R4, R1, R5
SUB  R6, R7, R8
MULT R9, R4, R10
DIV  R11, R12, R6
MULT R8, R1, R5
MULT R7, R2, R3
";

#[test]
fn test_raw_chain() {
    let mut ctx = TestContext::new(&[Instruction::add(1, 2, 3), Instruction::add(4, 1, 5)]);
    let cycles = ctx.run();

    assert_eq!(ctx.events(0), (1, 1, 4, 5));
    assert_eq!(ctx.events(1), (2, 6, 9, 10));
    assert_eq!(cycles, 10);
    assert_eq!((ctx.reg(1), ctx.reg(4)), (5, 10));
}

#[test]
fn test_war_reads_old_value() {
    // The SUB captures R2 = 2 at issue; the later MULT into R2 cannot reach it.
    let program = [
        Instruction::mult(5, 3, 3),
        Instruction::sub(1, 5, 2),
        Instruction::mult(2, 4, 4),
    ];
    let mut ctx = TestContext::new(&program);
    let _ = ctx.run();

    assert_eq!(ctx.reg(1), 7);
    assert_eq!(ctx.reg(2), 16);
}

#[test]
fn test_demo_program_timing() {
    let mut ctx = TestContext::from_text(DEMO);
    let cycles = ctx.run();

    let table: Vec<_> = (0..7).map(|i| ctx.events(i)).collect();
    assert_eq!(
        table,
        vec![
            (1, 1, 4, 5),
            (2, 6, 9, 10),
            (3, 3, 6, 7),
            (4, 11, 22, 23),
            (5, 8, 45, 46),
            (6, 6, 17, 18),
            (19, 19, 30, 31),
        ]
    );
    assert_eq!(cycles, 46);
    assert_eq!(ctx.engine().stats.structural_stalls, 12);
}

#[test]
fn test_demo_program_registers() {
    let mut ctx = TestContext::from_text(DEMO);
    let _ = ctx.run();

    assert_eq!(
        ctx.engine().registers(),
        &[0, 5, 2, 3, 10, 5, -1, 6, 25, 100, 10, -12, 12]
    );
    assert!(ctx.engine().register_status().iter().all(Option::is_none));
}
