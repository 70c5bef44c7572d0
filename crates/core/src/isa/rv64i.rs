//! RV64 additions to the base integer set.
//!
//! Word-sized (32-bit result) arithmetic plus doubleword and unsigned-word memory access.

use crate::isa::format::InstructionFormat::{self, I, R, S};

/// Extension key, as named in the riscv-opcodes tables.
pub const EXTENSION: &str = "rv64_i";

/// Mnemonic and format of each instruction, in table order.
pub const INSTRUCTIONS: &[(&str, InstructionFormat)] = &[
    ("addiw", I),
    ("slliw", I),
    ("srliw", I),
    ("sraiw", I),
    ("addw", R),
    ("subw", R),
    ("sllw", R),
    ("srlw", R),
    ("sraw", R),
    ("ld", I),
    ("lwu", I),
    ("sd", S),
];
