//! RISC-V Base Integer (I) instructions.
//!
//! Every operand-bearing RV32I instruction and its format. `ecall`, `ebreak` and `fence`
//! take no register/immediate operands and are not part of the format model.

use crate::isa::format::InstructionFormat::{self, B, I, J, R, S, U};

/// Extension key, as named in the riscv-opcodes tables.
pub const EXTENSION: &str = "rv_i";

/// Mnemonic and format of each instruction, in table order.
pub const INSTRUCTIONS: &[(&str, InstructionFormat)] = &[
    // Register-register arithmetic
    ("add", R),
    ("sub", R),
    ("sll", R),
    ("slt", R),
    ("sltu", R),
    ("xor", R),
    ("srl", R),
    ("sra", R),
    ("or", R),
    ("and", R),
    // Register-immediate arithmetic
    ("addi", I),
    ("slti", I),
    ("sltiu", I),
    ("xori", I),
    ("ori", I),
    ("andi", I),
    ("slli", I),
    ("srli", I),
    ("srai", I),
    // Loads
    ("lb", I),
    ("lh", I),
    ("lw", I),
    ("lbu", I),
    ("lhu", I),
    // Stores
    ("sb", S),
    ("sh", S),
    ("sw", S),
    // Branches
    ("beq", B),
    ("bne", B),
    ("blt", B),
    ("bge", B),
    ("bltu", B),
    ("bgeu", B),
    // Upper immediates
    ("lui", U),
    ("auipc", U),
    // Jumps
    ("jal", J),
    ("jalr", I),
];
