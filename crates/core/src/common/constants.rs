//! Crate-wide constants.
//!
//! Register file geometry and the characters that delimit comments, labels, and memory
//! operands in assembly text.

/// Number of integer registers (`x0` through `x31`).
pub const NUM_REGISTERS: usize = 32;

/// Highest valid integer register index.
pub const MAX_REGISTER: i64 = (NUM_REGISTERS as i64) - 1;

/// Index of the hardwired-zero register.
pub const ZERO_REGISTER: i64 = 0;

/// Starts a line comment; everything after it is ignored.
pub const COMMENT_MARKER: char = '#';

/// Terminates a label definition (`loop:`).
pub const LABEL_TERMINATOR: char = ':';

/// First character of an assembler directive (`.section`, `.global`).
pub const DIRECTIVE_PREFIX: char = '.';

/// Separates operands.
pub const OPERAND_SEPARATOR: char = ',';
