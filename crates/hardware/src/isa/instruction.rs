//! Operation kinds and decoded instructions.
//!
//! Every instruction has the shape `rd <- rs1 op rs2`. The operation kind
//! decides which reservation-station partition the instruction may occupy:
//! ADD and SUB share the adder stations, MULT and DIV each have their own.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Arithmetic operation performed by an instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OpKind {
    /// Integer addition.
    Add,
    /// Integer subtraction (`rs1 - rs2`).
    Sub,
    /// Integer multiplication.
    Mult,
    /// Integer division (`rs1 / rs2`, truncating toward zero).
    Div,
}

impl OpKind {
    /// Every operation kind, in display order.
    pub const ALL: [Self; 4] = [Self::Add, Self::Sub, Self::Mult, Self::Div];

    /// Reservation-station class this operation issues to.
    pub const fn class(self) -> OpClass {
        match self {
            Self::Add | Self::Sub => OpClass::Add,
            Self::Mult => OpClass::Mult,
            Self::Div => OpClass::Div,
        }
    }

    /// Assembly mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mult => "MULT",
            Self::Div => "DIV",
        }
    }

    /// Infix symbol used when printing `rd <- rs1 op rs2`.
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mult => '*',
            Self::Div => '/',
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Reservation-station partition.
///
/// Stations are laid out contiguously in the pool in the order
/// `Add`, `Mult`, `Div`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpClass {
    /// Adder stations, shared by ADD and SUB.
    Add,
    /// Multiplier stations.
    Mult,
    /// Divider stations.
    Div,
}

impl OpClass {
    /// Every class, in pool layout order.
    pub const ALL: [Self; 3] = [Self::Add, Self::Mult, Self::Div];

    /// Short name used for station labels (`Add1`, `Mult2`, ...).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::Mult => "Mult",
            Self::Div => "Div",
        }
    }

    /// Position of this class in [`OpClass::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Self::Add => 0,
            Self::Mult => 1,
            Self::Div => 2,
        }
    }
}

impl fmt::Display for OpClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A decoded instruction: `rd <- rs1 op rs2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instruction {
    /// Operation kind.
    pub op: OpKind,
    /// Destination register index.
    pub rd: usize,
    /// First source register index.
    pub rs1: usize,
    /// Second source register index.
    pub rs2: usize,
}

impl Instruction {
    /// Creates an instruction.
    pub const fn new(op: OpKind, rd: usize, rs1: usize, rs2: usize) -> Self {
        Self { op, rd, rs1, rs2 }
    }

    /// `rd <- rs1 + rs2`
    pub const fn add(rd: usize, rs1: usize, rs2: usize) -> Self {
        Self::new(OpKind::Add, rd, rs1, rs2)
    }

    /// `rd <- rs1 - rs2`
    pub const fn sub(rd: usize, rs1: usize, rs2: usize) -> Self {
        Self::new(OpKind::Sub, rd, rs1, rs2)
    }

    /// `rd <- rs1 * rs2`
    pub const fn mult(rd: usize, rs1: usize, rs2: usize) -> Self {
        Self::new(OpKind::Mult, rd, rs1, rs2)
    }

    /// `rd <- rs1 / rs2`
    pub const fn div(rd: usize, rs1: usize, rs2: usize) -> Self {
        Self::new(OpKind::Div, rd, rs1, rs2)
    }

    /// Highest register index this instruction touches.
    pub fn max_register(&self) -> usize {
        self.rd.max(self.rs1).max(self.rs2)
    }
}

impl fmt::Display for Instruction {
    /// Formats the instruction in program text syntax, e.g. `ADD R1, R2, R3`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} R{}, R{}, R{}", self.op, self.rd, self.rs1, self.rs2)
    }
}

/// Cycle numbers at which an instruction passed each pipeline event.
///
/// Each field is `None` until the event occurs and is written exactly once,
/// by the stage that causes the transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct InstructionTiming {
    /// Cycle the instruction entered a reservation station.
    pub issue: Option<u64>,
    /// First cycle both operands were available and the latency counter advanced.
    pub execute_begin: Option<u64>,
    /// Cycle the latency counter expired and the result was computed.
    pub execute_end: Option<u64>,
    /// Cycle the result was broadcast on the Common Data Bus.
    pub writeback: Option<u64>,
}
