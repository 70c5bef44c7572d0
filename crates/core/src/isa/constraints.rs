//! Format Constraint Engine.
//!
//! Pure functions over an [`InstructionFormat`] describing which operands exist, in what order,
//! and which values each one may take. The generator draws from exactly these domains and the
//! validator checks against exactly these predicates, so the two cannot drift apart.
//!
//! # Immediate constraints
//!
//! | Format | Width | Signed | Alignment | Legal values              |
//! |--------|-------|--------|-----------|---------------------------|
//! | I, S   | 12    | yes    | 1         | `-2048..=2047`            |
//! | B      | 12    | yes    | 2         | `-2048..=2046`, even      |
//! | U      | 20    | no     | 1         | `0..=1048575`             |
//! | J      | 20    | yes    | 2         | `-524288..=524286`, even  |
//!
//! Registers are `0..=31` for every format.

use serde::Serialize;
use thiserror::Error;

use crate::common::constants::MAX_REGISTER;
use crate::isa::format::{InstructionFormat, OperandRole};

/// Width, signedness, and alignment of a format's immediate field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ImmediateConstraint {
    /// Number of significant bits.
    pub bits: u32,
    /// Two's-complement signed when true, unsigned otherwise.
    pub signed: bool,
    /// Every legal value is a multiple of this divisor (1 = unconstrained).
    pub alignment: i64,
}

impl ImmediateConstraint {
    const fn new(bits: u32, signed: bool, alignment: i64) -> Self {
        Self {
            bits,
            signed,
            alignment,
        }
    }

    /// Smallest value representable in the field, ignoring alignment.
    pub const fn min(&self) -> i64 {
        if self.signed {
            -(1_i64 << (self.bits - 1))
        } else {
            0
        }
    }

    /// Largest value representable in the field, ignoring alignment.
    pub const fn max(&self) -> i64 {
        if self.signed {
            (1_i64 << (self.bits - 1)) - 1
        } else {
            (1_i64 << self.bits) - 1
        }
    }

    /// Smallest legal value (first multiple of the alignment at or above `min`).
    pub const fn aligned_min(&self) -> i64 {
        let min = self.min();
        let rem = min.rem_euclid(self.alignment);
        if rem == 0 {
            min
        } else {
            min + (self.alignment - rem)
        }
    }

    /// Largest legal value (last multiple of the alignment at or below `max`).
    pub const fn aligned_max(&self) -> i64 {
        let max = self.max();
        max - max.rem_euclid(self.alignment)
    }

    /// Number of distinct legal values.
    pub const fn domain_size(&self) -> u64 {
        ((self.aligned_max() - self.aligned_min()) / self.alignment) as u64 + 1
    }

    /// Checks `value` against range first, then alignment.
    ///
    /// # Errors
    ///
    /// [`ImmediateViolation::OutOfRange`] when the value does not fit the field,
    /// [`ImmediateViolation::Misaligned`] when it fits but is not a multiple of the alignment.
    pub const fn check(&self, value: i64) -> Result<(), ImmediateViolation> {
        if value < self.min() || value > self.max() {
            return Err(ImmediateViolation::OutOfRange {
                value,
                min: self.aligned_min(),
                max: self.aligned_max(),
            });
        }
        if value.rem_euclid(self.alignment) != 0 {
            return Err(ImmediateViolation::Misaligned {
                value,
                alignment: self.alignment,
            });
        }
        Ok(())
    }
}

/// Why an immediate value is illegal for a format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ImmediateViolation {
    /// Outside the field's range. `min`/`max` are the legal (aligned) bounds.
    #[error("value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Offending value.
        value: i64,
        /// Smallest legal value.
        min: i64,
        /// Largest legal value.
        max: i64,
    },

    /// In range but not a multiple of the required alignment.
    #[error("value {value} is not a multiple of {alignment}")]
    Misaligned {
        /// Offending value.
        value: i64,
        /// Required divisor.
        alignment: i64,
    },

    /// The format has no immediate operand at all.
    #[error("{format} instructions take no immediate")]
    NoImmediate {
        /// The immediate-less format.
        format: InstructionFormat,
    },
}

/// Immediate constraints, indexed by [`InstructionFormat::index`]. R-Type has none.
const IMMEDIATE_CONSTRAINTS: [Option<ImmediateConstraint>; 6] = [
    None,
    Some(ImmediateConstraint::new(12, true, 1)),
    Some(ImmediateConstraint::new(12, true, 1)),
    Some(ImmediateConstraint::new(12, true, 2)),
    Some(ImmediateConstraint::new(20, false, 1)),
    Some(ImmediateConstraint::new(20, true, 2)),
];

const R_ROLES: [OperandRole; 3] = [OperandRole::Rd, OperandRole::Rs1, OperandRole::Rs2];
const I_ROLES: [OperandRole; 3] = [OperandRole::Rd, OperandRole::Rs1, OperandRole::Imm];
const S_ROLES: [OperandRole; 3] = [OperandRole::Rs2, OperandRole::Rs1, OperandRole::Imm];
const B_ROLES: [OperandRole; 3] = [OperandRole::Rs1, OperandRole::Rs2, OperandRole::Imm];
const U_ROLES: [OperandRole; 2] = [OperandRole::Rd, OperandRole::Imm];
const J_ROLES: [OperandRole; 2] = [OperandRole::Rd, OperandRole::Imm];

/// `imm(rs1)` spelling of I-Type (loads, `jalr`).
const I_MEMORY_ROLES: [OperandRole; 3] = [OperandRole::Rd, OperandRole::Imm, OperandRole::Rs1];
/// `imm(rs1)` spelling of S-Type.
const S_MEMORY_ROLES: [OperandRole; 3] = [OperandRole::Rs2, OperandRole::Imm, OperandRole::Rs1];

/// I-Type mnemonics whose immediate is an offset from `rs1`.
pub const BASE_OFFSET_MNEMONICS: [&str; 8] =
    ["lb", "lh", "lw", "ld", "lbu", "lhu", "lwu", "jalr"];

/// Operand roles of `format`, in assembly order.
pub const fn operand_roles(format: InstructionFormat) -> &'static [OperandRole] {
    match format {
        InstructionFormat::R => &R_ROLES,
        InstructionFormat::I => &I_ROLES,
        InstructionFormat::S => &S_ROLES,
        InstructionFormat::B => &B_ROLES,
        InstructionFormat::U => &U_ROLES,
        InstructionFormat::J => &J_ROLES,
    }
}

/// Operand roles of `format` when written with the `imm(rs1)` memory spelling.
///
/// Returns `None` for formats that have no base-plus-offset operand. Within I-Type only the
/// [`BASE_OFFSET_MNEMONICS`] take this spelling; see
/// [`InstructionSpec::memory_roles`](crate::isa::catalog::InstructionSpec::memory_roles).
pub const fn memory_operand_roles(format: InstructionFormat) -> Option<&'static [OperandRole]> {
    match format {
        InstructionFormat::I => Some(&I_MEMORY_ROLES),
        InstructionFormat::S => Some(&S_MEMORY_ROLES),
        _ => None,
    }
}

/// Number of operands an instruction of `format` takes.
pub const fn expected_operand_count(format: InstructionFormat) -> usize {
    operand_roles(format).len()
}

/// Immediate constraint of `format`, or `None` for R-Type.
pub const fn immediate_constraint(format: InstructionFormat) -> Option<ImmediateConstraint> {
    IMMEDIATE_CONSTRAINTS[format.index()]
}

/// True iff `value` names an integer register (`0..=31`).
#[inline]
pub const fn is_valid_register(value: i64) -> bool {
    0 <= value && value <= MAX_REGISTER
}

/// True iff `value` is within the immediate range of `format` and properly aligned.
///
/// Always false for R-Type, which has no immediate.
pub const fn is_valid_immediate(format: InstructionFormat, value: i64) -> bool {
    check_immediate(format, value).is_ok()
}

/// Checks `value` as the immediate of `format`.
///
/// # Errors
///
/// The [`ImmediateViolation`] that makes the value illegal; range violations take precedence
/// over alignment.
pub const fn check_immediate(
    format: InstructionFormat,
    value: i64,
) -> Result<(), ImmediateViolation> {
    match immediate_constraint(format) {
        Some(constraint) => constraint.check(value),
        None => Err(ImmediateViolation::NoImmediate { format }),
    }
}
