//! Instruction Set Architecture (ISA) model.
//!
//! Describes instructions by format rather than by encoding bits. Every mnemonic belongs to
//! exactly one format, and the format alone decides operand arity, order, and legal values.
//!
//! # Extensions
//!
//! * `rv32i`: Base Integer Instruction Set (32-bit).
//! * `rv32m`: Standard Extension for Integer Multiplication and Division.
//! * `rv64i`: RV64 additions to the base set (word operations, doubleword loads/stores).
//! * `rv64m`: RV64 word-sized multiply/divide.

/// Application Binary Interface (ABI) register names.
pub mod abi;

/// Mnemonic to instruction spec mapping, builtin tables and JSON loading.
pub mod catalog;

/// Operand legality predicates shared by the generator and the validator.
pub mod constraints;

/// Instruction formats and operand roles.
pub mod format;

/// Base integer instruction set (32-bit).
pub mod rv32i;

/// Integer multiply/divide extension.
pub mod rv32m;

/// RV64 base integer additions.
pub mod rv64i;

/// RV64 multiply/divide additions.
pub mod rv64m;
