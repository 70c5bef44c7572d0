//! RISC-V instruction model for assembly generation and validation.
//!
//! This crate describes the fixed-width RV32/RV64 integer instruction formats as data and uses
//! that one description in both directions:
//! 1. **ISA:** Formats, operand roles, immediate/register constraints, and the instruction catalog.
//! 2. **Generator:** Draws legal operand tuples with an injected RNG and renders assembly text.
//! 3. **Validator:** Tokenizes assembly lines and checks them against the same constraints.
//! 4. **Configuration:** JSON-backed defaults for the generator and validator.
//!
//! Anything the generator emits, the validator accepts; anything the validator rejects lies
//! outside the encoding's legal space.

/// Common types shared across the crate (errors, constants).
pub mod common;
/// Generator and validator configuration (defaults, enums, JSON loading).
pub mod config;
/// Random instruction generation and assembly rendering.
pub mod generator;
/// Instruction set model (formats, constraints, ABI names, catalog).
pub mod isa;
/// Assembly text validation (tokenizer, per-line verdicts, reports).
pub mod validator;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Random instruction generator over a catalog.
pub use crate::generator::Generator;
/// Mnemonic to format mapping; build with `Catalog::builtin()` or load from JSON.
pub use crate::isa::catalog::Catalog;
/// Closed set of RISC-V base instruction formats.
pub use crate::isa::format::InstructionFormat;
/// Line-by-line assembly validator over a catalog.
pub use crate::validator::Validator;
