//! Program Text Tests.
//!
//! The parser is exercised in detail next to its implementation; these tests
//! cover how parsed programs meet the engine.

use rstest::rstest;
use tomasulo_core::config::Config;
use tomasulo_core::isa::{Instruction, OpKind, parse_program};
use tomasulo_core::{SimError, Simulator};

#[rstest]
#[case("ADD R1, R2, R3", OpKind::Add)]
#[case("add r1 r2 r3", OpKind::Add)]
#[case("SUB R1,R2,R3", OpKind::Sub)]
#[case("MULT R1, R2, R3", OpKind::Mult)]
#[case("mul R1, R2, R3", OpKind::Mult)]
#[case("Div R1, R2, R3", OpKind::Div)]
fn test_mnemonic_spellings(#[case] text: &str, #[case] op: OpKind) {
    assert_eq!(parse_program(text).unwrap(), vec![Instruction::new(op, 1, 2, 3)]);
}

#[test]
fn test_empty_text_is_empty_program() {
    assert_eq!(parse_program("").unwrap(), Vec::new());
    assert_eq!(parse_program("# nothing\n; here\n").unwrap(), Vec::new());
}

#[test]
fn test_out_of_range_register_parses_but_engine_rejects() {
    let program = parse_program("ADD R1, R2, R3\nADD R13, R1, R2").unwrap();
    let err = Simulator::new(&Config::default(), program).unwrap_err();
    assert_eq!(
        err,
        SimError::InvalidRegister {
            instruction: 1,
            register: 13,
            count: 13,
        }
    );
}

#[test]
fn test_first_bad_line_is_reported() {
    let err = parse_program("ADD R1, R2, R3\n\nSUB R1, R2\nFOO").unwrap_err();
    assert!(matches!(err, SimError::Parse { line: 3, .. }));
}
