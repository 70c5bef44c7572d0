//! Assembly validation.
//!
//! Each line runs through a small state machine:
//! 1. **Classification:** blank, comment, directive, and bare label lines carry no findings.
//! 2. **Tokenization:** a line that cannot be split into mnemonic and operands is `Malformed`
//!    with a single `unparseable-line` error.
//! 3. **Lookup:** an unknown mnemonic yields one `unknown-mnemonic` error.
//! 4. **Operand checks:** count first (a mismatch stops there), then every operand in role
//!    order against the format's register and immediate constraints.
//!
//! Findings accumulate; a line is valid when none of them is an error. The validator holds no
//! mutable state, so validating the same text twice yields identical reports.

/// Line tokenizer.
pub mod lexer;
/// Aggregate report and text rendering.
pub mod report;
/// Per-line verdicts and findings.
pub mod verdict;

use std::io::{self, BufRead};

use tracing::debug;

use crate::common::constants::ZERO_REGISTER;
use crate::config::{ValidatorConfig, ZeroRegisterPolicy};
use crate::isa::catalog::{Catalog, InstructionSpec};
use crate::isa::constraints::{
    ImmediateViolation, check_immediate, expected_operand_count, is_valid_register,
};
use crate::isa::format::{OperandKind, OperandRole};
use crate::validator::lexer::{Line, Operand, OperandToken, tokenize};

pub use report::{Summary, ValidationReport};
pub use verdict::{Finding, FindingCode, LineClass, LineVerdict, Severity};

/// Source name used for in-memory text.
const DEFAULT_SOURCE: &str = "<input>";

/// Line-by-line validator over a catalog.
#[derive(Clone, Copy, Debug)]
pub struct Validator<'a> {
    catalog: &'a Catalog,
    config: ValidatorConfig,
}

impl<'a> Validator<'a> {
    /// Creates a validator with the default configuration.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self::with_config(catalog, ValidatorConfig::default())
    }

    /// Creates a validator with `config`.
    pub const fn with_config(catalog: &'a Catalog, config: ValidatorConfig) -> Self {
        Self { catalog, config }
    }

    /// Validates one line.
    ///
    /// # Arguments
    ///
    /// * `line_number` - 1-based position reported in the verdict.
    /// * `text` - The line, with or without its trailing newline.
    pub fn validate_line(&self, line_number: usize, text: &str) -> LineVerdict {
        let text = text.trim_end_matches(['\n', '\r']);
        match tokenize(text) {
            Ok(Line::Blank) => LineVerdict::new(line_number, text, LineClass::Blank),
            Ok(Line::Comment) => LineVerdict::new(line_number, text, LineClass::Comment),
            Ok(Line::Label(name)) => {
                let mut verdict = LineVerdict::new(line_number, text, LineClass::Label);
                verdict.label = Some(name.to_string());
                verdict
            }
            Ok(Line::Directive(_)) => LineVerdict::new(line_number, text, LineClass::Directive),
            Ok(Line::Instruction {
                label,
                mnemonic,
                operands,
                memory_form,
            }) => {
                let mut verdict = LineVerdict::new(line_number, text, LineClass::Instruction);
                verdict.label = label.map(str::to_string);
                match self.catalog.lookup(mnemonic) {
                    Ok(spec) => {
                        verdict.mnemonic = Some(spec.mnemonic.clone());
                        verdict.findings = self.check_operands(spec, &operands, memory_form);
                    }
                    Err(e) => {
                        verdict.mnemonic = Some(mnemonic.to_ascii_lowercase());
                        verdict
                            .findings
                            .push(Finding::new(FindingCode::UnknownMnemonic, e.to_string()));
                    }
                }
                verdict
            }
            Err(e) => {
                let mut verdict = LineVerdict::new(line_number, text, LineClass::Malformed);
                verdict.findings.push(Finding::new(
                    FindingCode::UnparseableLine,
                    format!("unparseable line: {e}"),
                ));
                verdict
            }
        }
    }

    /// Validates every line of `text`.
    pub fn validate_str(&self, text: &str) -> ValidationReport {
        self.validate_lines(DEFAULT_SOURCE, text.lines())
    }

    /// Validates a sequence of lines under the source name `source`.
    pub fn validate_lines<I, S>(&self, source: &str, lines: I) -> ValidationReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let verdicts: Vec<LineVerdict> = lines
            .into_iter()
            .enumerate()
            .map(|(i, line)| self.validate_line(i + 1, line.as_ref()))
            .collect();
        let report = ValidationReport::new(source, verdicts);
        debug!(
            source,
            lines = report.summary.total_lines,
            errors = report.summary.errors,
            warnings = report.summary.warnings,
            "validated input"
        );
        report
    }

    /// Validates everything readable from `reader`.
    ///
    /// # Errors
    ///
    /// Any I/O error from the reader. Invalid assembly is never an error; it is reported in
    /// the returned report.
    pub fn validate_reader<R: BufRead>(&self, reader: R) -> io::Result<ValidationReport> {
        let lines = reader.lines().collect::<io::Result<Vec<String>>>()?;
        Ok(self.validate_lines(DEFAULT_SOURCE, lines))
    }

    fn check_operands(
        &self,
        spec: &InstructionSpec,
        operands: &[Operand],
        memory_form: bool,
    ) -> Vec<Finding> {
        let expected = expected_operand_count(spec.format);
        if operands.len() != expected {
            return vec![Finding::new(
                FindingCode::WrongOperandCount,
                format!(
                    "wrong operand count: {} ({}) takes {expected} operands, found {}",
                    spec.mnemonic,
                    spec.format.name(),
                    operands.len()
                ),
            )];
        }

        let roles = match (memory_form, spec.memory_roles()) {
            (false, _) => spec.roles(),
            (true, Some(roles)) => roles,
            (true, None) => {
                return vec![Finding::new(
                    FindingCode::OperandKindMismatch,
                    format!(
                        "operand kind mismatch: {} ({}) takes no imm(rs1) operand",
                        spec.mnemonic,
                        spec.format.name()
                    ),
                )];
            }
        };

        let mut findings = Vec::new();
        for (&role, operand) in roles.iter().zip(operands) {
            if let Some(finding) = self.check_operand(spec, role, operand) {
                findings.push(finding);
            }
        }
        findings
    }

    fn check_operand(
        &self,
        spec: &InstructionSpec,
        role: OperandRole,
        operand: &Operand,
    ) -> Option<Finding> {
        match (role.kind(), &operand.token) {
            (OperandKind::Register, &OperandToken::Register(idx)) => {
                if !is_valid_register(idx) {
                    return Some(Finding::new(
                        FindingCode::RegisterOutOfRange,
                        format!(
                            "register out of range: {role} is '{}', registers are x0..x31",
                            operand.text
                        ),
                    ));
                }
                (idx == ZERO_REGISTER && self.warns_on_zero(role)).then(|| {
                    Finding::new(
                        FindingCode::ZeroRegister,
                        format!("zero register used: {role} is x0, which is hardwired to zero"),
                    )
                })
            }
            (OperandKind::Immediate, &OperandToken::Immediate(value)) => {
                match check_immediate(spec.format, value) {
                    Ok(()) => None,
                    Err(ImmediateViolation::OutOfRange { min, max, .. }) => Some(Finding::new(
                        FindingCode::ImmediateOutOfRange,
                        format!(
                            "immediate out of range: {role} value {value} is outside \
                             [{min}, {max}] for {}",
                            spec.format.name()
                        ),
                    )),
                    Err(ImmediateViolation::Misaligned { alignment, .. }) => Some(Finding::new(
                        FindingCode::MisalignedImmediate,
                        format!(
                            "misaligned immediate: {role} value {value} is not a multiple of \
                             {alignment} for {}",
                            spec.format.name()
                        ),
                    )),
                    Err(violation @ ImmediateViolation::NoImmediate { .. }) => Some(Finding::new(
                        FindingCode::OperandKindMismatch,
                        format!("operand kind mismatch: {violation}"),
                    )),
                }
            }
            (expected, _) => Some(Finding::new(
                FindingCode::OperandKindMismatch,
                format!(
                    "operand kind mismatch: {role} expects {} {expected}, found '{}'",
                    article(expected),
                    operand.text
                ),
            )),
        }
    }

    const fn warns_on_zero(&self, role: OperandRole) -> bool {
        match self.config.zero_register {
            ZeroRegisterPolicy::AnyRole => true,
            ZeroRegisterPolicy::DestinationOnly => matches!(role, OperandRole::Rd),
            ZeroRegisterPolicy::Off => false,
        }
    }
}

const fn article(kind: OperandKind) -> &'static str {
    match kind {
        OperandKind::Register => "a",
        OperandKind::Immediate => "an",
    }
}
