//! Instruction formats and operand roles.
//!
//! The six base formats are a closed set. Each one fixes the roles its operands play and the
//! order in which they are written in assembly:
//!
//! | Format | Operands          | Example               |
//! |--------|-------------------|-----------------------|
//! | R      | `rd, rs1, rs2`    | `add x1, x2, x3`      |
//! | I      | `rd, rs1, imm`    | `addi x1, x2, -7`     |
//! | S      | `rs2, rs1, imm`   | `sw x5, x6, 12`       |
//! | B      | `rs1, rs2, imm`   | `beq x1, x2, 16`      |
//! | U      | `rd, imm`         | `lui x3, 4096`        |
//! | J      | `rd, imm`         | `jal x1, -2048`       |
//!
//! Stores, loads and `jalr` may also be written with an `imm(rs1)` operand (`sw x5, 12(x6)`,
//! `lw x5, 8(x6)`), which puts the immediate before the base register.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// RISC-V base instruction format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InstructionFormat {
    /// Register-register operations.
    R,
    /// Register-immediate operations, loads, and `jalr`.
    I,
    /// Stores.
    S,
    /// Conditional branches.
    B,
    /// Upper-immediate operations (`lui`, `auipc`).
    U,
    /// Unconditional jump (`jal`).
    J,
}

impl InstructionFormat {
    /// Every format, in table order.
    pub const ALL: [Self; 6] = [Self::R, Self::I, Self::S, Self::B, Self::U, Self::J];

    /// Position of this format in per-format tables.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Single-letter tag (`"R"`, `"I"`, ...), as used in opcode tables.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::R => "R",
            Self::I => "I",
            Self::S => "S",
            Self::B => "B",
            Self::U => "U",
            Self::J => "J",
        }
    }

    /// Long name used in diagnostics (`"B-Type"`).
    pub const fn name(self) -> &'static str {
        match self {
            Self::R => "R-Type",
            Self::I => "I-Type",
            Self::S => "S-Type",
            Self::B => "B-Type",
            Self::U => "U-Type",
            Self::J => "J-Type",
        }
    }
}

impl fmt::Display for InstructionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Error returned when a format tag is not one of `R`, `I`, `S`, `B`, `U`, `J`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown instruction format '{0}'")]
pub struct UnknownFormat(pub String);

impl FromStr for InstructionFormat {
    type Err = UnknownFormat;

    /// Parses `"R"`, `"r"`, `"R-Type"` or `"r-type"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let tag = trimmed
            .strip_suffix("-Type")
            .or_else(|| trimmed.strip_suffix("-type"))
            .unwrap_or(trimmed);
        match tag {
            "R" | "r" => Ok(Self::R),
            "I" | "i" => Ok(Self::I),
            "S" | "s" => Ok(Self::S),
            "B" | "b" => Ok(Self::B),
            "U" | "u" => Ok(Self::U),
            "J" | "j" => Ok(Self::J),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

/// Syntactic kind of an operand slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperandKind {
    /// An integer register (`x0`-`x31`).
    Register,
    /// An integer literal.
    Immediate,
}

impl fmt::Display for OperandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Register => f.write_str("register"),
            Self::Immediate => f.write_str("immediate"),
        }
    }
}

/// Named operand slot within a format.
///
/// A role's position is its index in [`operand_roles`](crate::isa::constraints::operand_roles).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperandRole {
    /// Destination register.
    Rd,
    /// First source register (the base register of loads and stores).
    Rs1,
    /// Second source register (the data register of stores).
    Rs2,
    /// Immediate value.
    Imm,
}

impl OperandRole {
    /// Kind of value this role holds.
    pub const fn kind(self) -> OperandKind {
        match self {
            Self::Rd | Self::Rs1 | Self::Rs2 => OperandKind::Register,
            Self::Imm => OperandKind::Immediate,
        }
    }

    /// Lower-case role name (`"rd"`, `"rs1"`, `"rs2"`, `"imm"`).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rd => "rd",
            Self::Rs1 => "rs1",
            Self::Rs2 => "rs2",
            Self::Imm => "imm",
        }
    }
}

impl fmt::Display for OperandRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
