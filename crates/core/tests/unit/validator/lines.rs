//! Line classification and operand findings.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rvforge_core::config::{ValidatorConfig, ZeroRegisterPolicy};
use rvforge_core::validator::{FindingCode, LineClass, LineVerdict, Severity};
use rvforge_core::{Catalog, Validator};

fn check(line: &str) -> LineVerdict {
    let catalog = Catalog::builtin();
    Validator::new(&catalog).validate_line(1, line)
}

fn codes(verdict: &LineVerdict) -> Vec<FindingCode> {
    verdict.findings.iter().map(|f| f.code).collect()
}

// ──────────────────────────────────────────────────────────
// Classification
// ──────────────────────────────────────────────────────────

#[rstest]
#[case("", LineClass::Blank)]
#[case("   \t", LineClass::Blank)]
#[case("# comment", LineClass::Comment)]
#[case("   # indented comment", LineClass::Comment)]
#[case(".section .text", LineClass::Directive)]
#[case("_start:", LineClass::Label)]
#[case("add x1, x2, x3", LineClass::Instruction)]
#[case("add x1,, x3", LineClass::Malformed)]
fn test_line_classes(#[case] line: &str, #[case] class: LineClass) {
    assert_eq!(check(line).class, class);
}

#[rstest]
#[case("")]
#[case("# header")]
#[case(".global _start")]
#[case("loop:")]
fn test_non_instruction_lines_have_no_findings(#[case] line: &str) {
    let verdict = check(line);
    assert!(verdict.findings.is_empty());
    assert!(verdict.is_valid());
    assert_eq!(verdict.mnemonic, None);
}

#[test]
fn test_labels_are_recorded() {
    let verdict = check("loop: addi x1, x1, -1");
    assert_eq!(verdict.label.as_deref(), Some("loop"));
    assert_eq!(verdict.mnemonic.as_deref(), Some("addi"));
    assert_eq!(check("_start:").label.as_deref(), Some("_start"));
    assert_eq!(check("add x1, x2, x3").label, None);
}

#[test]
fn test_verdict_records_position_and_text() {
    let catalog = Catalog::builtin();
    let verdict = Validator::new(&catalog).validate_line(17, "ADD x1, x2, x3\n");
    assert_eq!(verdict.line_number, 17);
    assert_eq!(verdict.text, "ADD x1, x2, x3");
    assert_eq!(verdict.mnemonic.as_deref(), Some("add"));
}

// ──────────────────────────────────────────────────────────
// Valid instructions
// ──────────────────────────────────────────────────────────

#[rstest]
#[case("addi x8, x31, -1736")]
#[case("add x1, x2, x3")]
#[case("addi x8, x31, -1736  # rd=x8, rs1=x31, imm=-1736")]
#[case("lw x5, 8(x6)")]
#[case("lw a0, -2048(sp)")]
#[case("lw x5, x6, 8")]
#[case("jalr x1, 0(x5)")]
#[case("sw x5, -12(x6)")]
#[case("sw x5, x6, 2047")]
#[case("sw x5, x6, 12")]
#[case("sd a0, sp, -8")]
#[case("beq x1, x2, -2048")]
#[case("bgeu x3, x4, 2046")]
#[case("lui x3, 0xfffff")]
#[case("auipc x3, 0")]
#[case("jal x1, -524288")]
#[case("jal ra, 0x7fffe")]
#[case("loop: addi x1, x1, -1")]
#[case("slliw x9, x9, 0b101")]
fn test_valid_instructions(#[case] line: &str) {
    let verdict = check(line);
    assert_eq!(verdict.class, LineClass::Instruction);
    assert!(verdict.findings.is_empty(), "{line}: {:?}", verdict.findings);
}

// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────

#[test]
fn test_out_of_range_immediate() {
    let verdict = check("addi x8, x31, 5000");
    assert_eq!(codes(&verdict), vec![FindingCode::ImmediateOutOfRange]);
    let message = &verdict.findings[0].message;
    assert!(message.contains("5000"), "{message}");
    assert!(message.contains("[-2048, 2047]"), "{message}");
    assert!(!verdict.is_valid());
}

#[test]
fn test_misaligned_branch_offset() {
    let verdict = check("beq x1, x2, 7");
    assert_eq!(codes(&verdict), vec![FindingCode::MisalignedImmediate]);
    assert!(verdict.findings[0].message.contains("multiple of 2"));
}

#[test]
fn test_out_of_range_takes_precedence_over_alignment() {
    let verdict = check("jal x1, 1048577");
    assert_eq!(codes(&verdict), vec![FindingCode::ImmediateOutOfRange]);
}

#[test]
fn test_unknown_mnemonic() {
    let verdict = check("foo x1, x2, x3");
    assert_eq!(verdict.class, LineClass::Instruction);
    assert_eq!(codes(&verdict), vec![FindingCode::UnknownMnemonic]);
    assert_eq!(verdict.findings[0].severity, Severity::Error);
    assert!(verdict.findings[0].message.contains("foo"));
}

#[rstest]
#[case("add x1, x2")]
#[case("add x1, x2, x3, x4")]
#[case("lui x1")]
#[case("jal x1, 8, 4")]
#[case("beq x1, x2")]
#[case("lw x5, 8(x6), 4")]
#[case("addi x1")]
fn test_wrong_operand_count(#[case] line: &str) {
    let verdict = check(line);
    assert_eq!(codes(&verdict), vec![FindingCode::WrongOperandCount], "{line}");
}

#[test]
fn test_wrong_operand_count_stops_further_checks() {
    let verdict = check("addi x99, x0");
    assert_eq!(codes(&verdict), vec![FindingCode::WrongOperandCount]);
}

#[rstest]
#[case("add x1, x2, 5")]
#[case("addi x1, 5, 7")]
#[case("addi x1, x2, x3")]
#[case("jal x1, target")]
#[case("add x1, x2, t9")]
#[case("sw x5, 12(40)")]
#[case("addi x1, 4(x2)")]
#[case("slli x1, 0(x2)")]
#[case("add x1, 4(x2)")]
#[case("beq x1, 8(x2)")]
fn test_operand_kind_mismatch(#[case] line: &str) {
    let verdict = check(line);
    assert_eq!(codes(&verdict), vec![FindingCode::OperandKindMismatch], "{line}");
}

#[test]
fn test_flat_store_puts_immediate_last() {
    let verdict = check("sw x5, 12, x6");
    assert_eq!(
        codes(&verdict),
        vec![FindingCode::OperandKindMismatch, FindingCode::OperandKindMismatch]
    );
    assert!(verdict.findings[0].message.contains("rs1 expects a register, found '12'"));
    assert!(verdict.findings[1].message.contains("imm expects an immediate, found 'x6'"));
}

#[test]
fn test_memory_operand_only_on_base_offset_instructions() {
    let verdict = check("addi x1, 4(x2)");
    assert!(verdict.findings[0].message.contains("addi (I-Type) takes no imm(rs1) operand"));
    assert!(check("lw x1, 4(x2)").findings.is_empty());
    assert!(check("jalr x1, 4(x2)").findings.is_empty());
}

#[rstest]
#[case("add x32, x1, x2")]
#[case("lw x5, 0(x40)")]
#[case("add x1, x99999999999999999999999, x2")]
fn test_register_out_of_range(#[case] line: &str) {
    let verdict = check(line);
    assert_eq!(codes(&verdict), vec![FindingCode::RegisterOutOfRange], "{line}");
}

#[test]
fn test_saturated_literal_is_out_of_range() {
    let verdict = check("addi x1, x2, 99999999999999999999999");
    assert_eq!(codes(&verdict), vec![FindingCode::ImmediateOutOfRange]);
}

#[test]
fn test_findings_accumulate_in_operand_order() {
    let verdict = check("beq x32, x0, 7");
    assert_eq!(
        codes(&verdict),
        vec![
            FindingCode::RegisterOutOfRange,
            FindingCode::ZeroRegister,
            FindingCode::MisalignedImmediate
        ]
    );
    assert_eq!(verdict.error_count(), 2);
    assert_eq!(verdict.warning_count(), 1);
}

#[rstest]
#[case("add x1, (x2, x3")]
#[case("sw x1, 4(x2))")]
#[case("add x1, x2,")]
#[case("sw x1, 4(x2)x3")]
#[case("1add x1, x2, x3")]
#[case("sw x1, 4()")]
#[case("add x1 x2 x3")]
#[case("addi x1, x2 5")]
#[case("sw x1, 4(x2 x3)")]
fn test_unparseable_lines(#[case] line: &str) {
    let verdict = check(line);
    assert_eq!(verdict.class, LineClass::Malformed);
    assert_eq!(codes(&verdict), vec![FindingCode::UnparseableLine], "{line}");
    assert_eq!(verdict.mnemonic, None);
}

// ──────────────────────────────────────────────────────────
// Zero register
// ──────────────────────────────────────────────────────────

#[test]
fn test_zero_register_warning() {
    let verdict = check("sub x15, x5, x0");
    assert_eq!(codes(&verdict), vec![FindingCode::ZeroRegister]);
    assert_eq!(verdict.findings[0].severity, Severity::Warning);
    assert!(verdict.findings[0].message.contains("rs2"));
    assert!(verdict.is_valid());
}

#[rstest]
#[case(ZeroRegisterPolicy::AnyRole, "add x0, zero, x0", 3)]
#[case(ZeroRegisterPolicy::DestinationOnly, "add x0, zero, x0", 1)]
#[case(ZeroRegisterPolicy::DestinationOnly, "sub x15, x5, x0", 0)]
#[case(ZeroRegisterPolicy::Off, "add x0, zero, x0", 0)]
fn test_zero_register_policy(
    #[case] policy: ZeroRegisterPolicy,
    #[case] line: &str,
    #[case] warnings: usize,
) {
    let catalog = Catalog::builtin();
    let validator = Validator::with_config(&catalog, ValidatorConfig { zero_register: policy });
    let verdict = validator.validate_line(1, line);
    assert_eq!(verdict.warning_count(), warnings);
    assert_eq!(verdict.error_count(), 0);
}

#[test]
fn test_finding_display() {
    let verdict = check("sub x15, x5, x0");
    assert!(
        verdict.findings[0]
            .to_string()
            .starts_with("warning[zero-register]: ")
    );
}
