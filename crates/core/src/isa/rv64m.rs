//! RV64 word-sized multiply/divide.

use crate::isa::format::InstructionFormat::{self, R};

/// Extension key, as named in the riscv-opcodes tables.
pub const EXTENSION: &str = "rv64_m";

/// Mnemonic and format of each instruction, in table order.
pub const INSTRUCTIONS: &[(&str, InstructionFormat)] = &[
    ("mulw", R),
    ("divw", R),
    ("divuw", R),
    ("remw", R),
    ("remuw", R),
];
