//! RISC-V Integer Multiplication and Division (M) instructions.

use crate::isa::format::InstructionFormat::{self, R};

/// Extension key, as named in the riscv-opcodes tables.
pub const EXTENSION: &str = "rv_m";

/// Mnemonic and format of each instruction, in table order.
pub const INSTRUCTIONS: &[(&str, InstructionFormat)] = &[
    ("mul", R),
    ("mulh", R),
    ("mulhsu", R),
    ("mulhu", R),
    ("div", R),
    ("divu", R),
    ("rem", R),
    ("remu", R),
];
