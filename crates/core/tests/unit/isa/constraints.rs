//! Immediate and register constraint predicates.
//!
//! Boundary values of every format, alignment of B/J, and a property check that the
//! predicate agrees with the tabulated ranges.

use proptest::prelude::*;
use rstest::rstest;
use rvforge_core::InstructionFormat;
use rvforge_core::isa::constraints::*;

#[rstest]
#[case(InstructionFormat::I, -2048, 2047)]
#[case(InstructionFormat::S, -2048, 2047)]
#[case(InstructionFormat::B, -2048, 2046)]
#[case(InstructionFormat::U, 0, 1_048_575)]
#[case(InstructionFormat::J, -524_288, 524_286)]
fn test_aligned_bounds(#[case] format: InstructionFormat, #[case] min: i64, #[case] max: i64) {
    let constraint = immediate_constraint(format).unwrap();
    assert_eq!(constraint.aligned_min(), min);
    assert_eq!(constraint.aligned_max(), max);
    assert!(is_valid_immediate(format, min));
    assert!(is_valid_immediate(format, max));
    assert!(!is_valid_immediate(format, min - 1));
    assert!(!is_valid_immediate(format, max + constraint.alignment));
}

#[test]
fn test_r_type_has_no_immediate() {
    assert_eq!(immediate_constraint(InstructionFormat::R), None);
    assert!(!is_valid_immediate(InstructionFormat::R, 0));
    assert_eq!(
        check_immediate(InstructionFormat::R, 0),
        Err(ImmediateViolation::NoImmediate {
            format: InstructionFormat::R
        })
    );
}

#[test]
fn test_branch_offsets_must_be_even() {
    assert!(is_valid_immediate(InstructionFormat::B, 8));
    assert!(!is_valid_immediate(InstructionFormat::B, 7));
    assert!(!is_valid_immediate(InstructionFormat::B, -3));
    assert!(!is_valid_immediate(InstructionFormat::J, 524_287));
    assert!(is_valid_immediate(InstructionFormat::J, -524_288));
}

#[test]
fn test_range_is_reported_before_alignment() {
    assert_eq!(
        check_immediate(InstructionFormat::B, 4097),
        Err(ImmediateViolation::OutOfRange {
            value: 4097,
            min: -2048,
            max: 2046
        })
    );
    assert_eq!(
        check_immediate(InstructionFormat::B, 7),
        Err(ImmediateViolation::Misaligned {
            value: 7,
            alignment: 2
        })
    );
    assert_eq!(check_immediate(InstructionFormat::I, -2048), Ok(()));
}

#[test]
fn test_violation_messages() {
    let err = check_immediate(InstructionFormat::I, 5000).unwrap_err();
    assert_eq!(err.to_string(), "value 5000 is out of range [-2048, 2047]");
    let err = check_immediate(InstructionFormat::J, 3).unwrap_err();
    assert_eq!(err.to_string(), "value 3 is not a multiple of 2");
}

#[test]
fn test_domain_sizes() {
    assert_eq!(immediate_constraint(InstructionFormat::I).unwrap().domain_size(), 4096);
    assert_eq!(immediate_constraint(InstructionFormat::B).unwrap().domain_size(), 2048);
    assert_eq!(immediate_constraint(InstructionFormat::U).unwrap().domain_size(), 1 << 20);
    assert_eq!(immediate_constraint(InstructionFormat::J).unwrap().domain_size(), 1 << 19);
}

#[rstest]
#[case(0, true)]
#[case(31, true)]
#[case(32, false)]
#[case(-1, false)]
#[case(i64::MAX, false)]
fn test_register_predicate(#[case] value: i64, #[case] valid: bool) {
    assert_eq!(is_valid_register(value), valid);
}

fn tabulated(format: InstructionFormat, value: i64) -> bool {
    match format {
        InstructionFormat::R => false,
        InstructionFormat::I | InstructionFormat::S => (-2048..=2047).contains(&value),
        InstructionFormat::B => (-2048..=2046).contains(&value) && value % 2 == 0,
        InstructionFormat::U => (0..=1_048_575).contains(&value),
        InstructionFormat::J => (-524_288..=524_286).contains(&value) && value % 2 == 0,
    }
}

proptest! {
    #[test]
    fn prop_immediate_predicate_matches_table(
        format_idx in 0..6usize,
        value in -2_000_000i64..2_000_000,
    ) {
        let format = InstructionFormat::ALL[format_idx];
        prop_assert_eq!(is_valid_immediate(format, value), tabulated(format, value));
    }

    #[test]
    fn prop_register_predicate(value in any::<i64>()) {
        prop_assert_eq!(is_valid_register(value), (0..=31).contains(&value));
    }
}
