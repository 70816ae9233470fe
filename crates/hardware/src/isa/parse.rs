//! Program text parser.
//!
//! Programs are written one instruction per line:
//!
//! ```text
//! # rd <- rs1 op rs2
//! ADD  R1, R2, R3
//! MULT R9, R4, R10
//! ```
//!
//! Mnemonics and register prefixes are case-insensitive, operands may be
//! separated by commas and/or whitespace, and everything after `#` or `;` is a
//! comment.

use crate::common::SimError;
use crate::isa::instruction::{Instruction, OpKind};

/// Parses a whole program.
///
/// Blank and comment-only lines are skipped. Register indices are not checked
/// against a register count here; the engine does that at construction.
///
/// # Errors
///
/// Returns [`SimError::Parse`] with the 1-based line number of the first
/// malformed line.
pub fn parse_program(text: &str) -> Result<Vec<Instruction>, SimError> {
    let mut program = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }
        let inst = parse_line(line).map_err(|reason| SimError::Parse { line: i + 1, reason })?;
        program.push(inst);
    }
    Ok(program)
}

fn strip_comment(line: &str) -> &str {
    match line.find(['#', ';']) {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_line(line: &str) -> Result<Instruction, String> {
    let mut tokens = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty());

    let mnemonic = tokens.next().ok_or_else(|| "missing mnemonic".to_string())?;
    let op = parse_op(mnemonic)?;

    let regs: Vec<&str> = tokens.collect();
    if regs.len() != 3 {
        return Err(format!(
            "{} expects 3 register operands, found {}",
            op.mnemonic(),
            regs.len()
        ));
    }

    Ok(Instruction::new(
        op,
        parse_reg(regs[0])?,
        parse_reg(regs[1])?,
        parse_reg(regs[2])?,
    ))
}

fn parse_op(mnemonic: &str) -> Result<OpKind, String> {
    match mnemonic.to_ascii_uppercase().as_str() {
        "ADD" => Ok(OpKind::Add),
        "SUB" => Ok(OpKind::Sub),
        "MULT" | "MUL" => Ok(OpKind::Mult),
        "DIV" => Ok(OpKind::Div),
        _ => Err(format!("unknown mnemonic `{mnemonic}`")),
    }
}

fn parse_reg(token: &str) -> Result<usize, String> {
    let digits = token
        .strip_prefix('R')
        .or_else(|| token.strip_prefix('r'))
        .ok_or_else(|| format!("expected a register like `R3`, found `{token}`"))?;
    digits
        .parse::<usize>()
        .map_err(|_| format!("invalid register number in `{token}`"))
}
