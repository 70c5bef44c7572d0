//! Per-line validation results.

use std::fmt;

use serde::Serialize;

/// How serious a finding is. Only errors make a line invalid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Style issue; the line is still valid.
    Warning,
    /// The line is outside the legal encoding space.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Stable identifier of a finding kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FindingCode {
    /// The line could not be split into a mnemonic and operands.
    UnparseableLine,
    /// The mnemonic is not in the catalog.
    UnknownMnemonic,
    /// Operand count differs from the format's.
    WrongOperandCount,
    /// A register slot holds a non-register, or an immediate slot a non-immediate.
    OperandKindMismatch,
    /// Register index above 31.
    RegisterOutOfRange,
    /// `x0` used as an operand.
    ZeroRegister,
    /// Immediate outside the format's range.
    ImmediateOutOfRange,
    /// Immediate in range but not a multiple of the format's alignment.
    MisalignedImmediate,
}

impl FindingCode {
    /// Kebab-case name, as serialized.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnparseableLine => "unparseable-line",
            Self::UnknownMnemonic => "unknown-mnemonic",
            Self::WrongOperandCount => "wrong-operand-count",
            Self::OperandKindMismatch => "operand-kind-mismatch",
            Self::RegisterOutOfRange => "register-out-of-range",
            Self::ZeroRegister => "zero-register",
            Self::ImmediateOutOfRange => "immediate-out-of-range",
            Self::MisalignedImmediate => "misaligned-immediate",
        }
    }

    /// Severity findings of this kind are reported with.
    pub const fn severity(self) -> Severity {
        match self {
            Self::ZeroRegister => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for FindingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One problem found on a line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Error or warning.
    pub severity: Severity,
    /// Finding kind.
    pub code: FindingCode,
    /// Human-readable detail naming the offending operand and the bound it broke.
    pub message: String,
}

impl Finding {
    /// Creates a finding with the code's default severity.
    pub fn new(code: FindingCode, message: impl Into<String>) -> Self {
        Self {
            severity: code.severity(),
            code,
            message: message.into(),
        }
    }

    /// True for error findings.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)
    }
}

/// What a line turned out to be.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineClass {
    /// Mnemonic plus operands (whether or not the mnemonic is known).
    Instruction,
    /// Full-line `#` comment.
    Comment,
    /// Empty or whitespace.
    Blank,
    /// Could not be tokenized.
    Malformed,
    /// Label definition alone.
    Label,
    /// Assembler directive.
    Directive,
}

/// Validation result of one line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LineVerdict {
    /// 1-based line number.
    pub line_number: usize,
    /// Line text without the trailing newline.
    pub text: String,
    /// Classification.
    pub class: LineClass,
    /// Label defined on this line, alone or in front of an instruction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Lower-case mnemonic of instruction lines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mnemonic: Option<String>,
    /// Findings in operand order.
    pub findings: Vec<Finding>,
}

impl LineVerdict {
    pub(crate) fn new(line_number: usize, text: &str, class: LineClass) -> Self {
        Self {
            line_number,
            text: text.to_string(),
            class,
            label: None,
            mnemonic: None,
            findings: Vec::new(),
        }
    }

    /// True when the line has no error findings.
    pub fn is_valid(&self) -> bool {
        !self.findings.iter().any(Finding::is_error)
    }

    /// Number of error findings.
    pub fn error_count(&self) -> usize {
        self.findings.iter().filter(|f| f.is_error()).count()
    }

    /// Number of warning findings.
    pub fn warning_count(&self) -> usize {
        self.findings.len() - self.error_count()
    }

    /// True if any finding has `code`.
    pub fn has(&self, code: FindingCode) -> bool {
        self.findings.iter().any(|f| f.code == code)
    }
}
