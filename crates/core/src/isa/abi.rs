//! RISC-V Application Binary Interface (ABI) register names.
//!
//! Maps between integer register indices and their ABI names, and parses the register
//! spellings accepted in assembly text (`x7`, `t2`, `fp`, ...).

use crate::common::constants::NUM_REGISTERS;

/// ABI register names for x0–x31.
pub const REG_NAMES: [&str; NUM_REGISTERS] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3", "a4",
    "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11", "t3", "t4",
    "t5", "t6",
];

/// Alternate name for x8 (frame pointer).
const FRAME_POINTER_ALIAS: &str = "fp";

/// Index of the frame pointer register.
const REG_FP: i64 = 8;

/// Returns the ABI name for an integer register index, or `None` outside `0..=31`.
#[inline]
pub fn abi_name(idx: i64) -> Option<&'static str> {
    usize::try_from(idx)
        .ok()
        .and_then(|i| REG_NAMES.get(i).copied())
}

/// Parses a register spelling.
///
/// Accepts `x<digits>` (any number, so that `x32` parses and is later rejected by range
/// checks) and the ABI names, case-insensitively. Indices too large for `i64` saturate.
/// Returns `None` for anything that is not spelled like a register.
pub fn parse_register(text: &str) -> Option<i64> {
    let lower = text.to_ascii_lowercase();

    if let Some(digits) = lower.strip_prefix('x') {
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            return Some(digits.parse::<i64>().unwrap_or(i64::MAX));
        }
        return None;
    }

    if lower == FRAME_POINTER_ALIAS {
        return Some(REG_FP);
    }

    REG_NAMES
        .iter()
        .position(|name| *name == lower)
        .map(|i| i as i64)
}
