//! Assembly line tokenizer.
//!
//! Splits one line of assembly into its structural parts. It performs no catalog lookups and
//! no range checks: `x99` is still a register token and `5000` still an immediate token, and
//! the validator decides whether they are legal.
//!
//! Recognized line shapes:
//! - blank, `# comment`
//! - `label:` on its own, or in front of an instruction
//! - `.directive args`
//! - `mnemonic op, op, ...` where an operand is a register (`x5`, `a0`), an integer literal
//!   (`-12`, `0x7ff`, `0b101`), a memory operand `imm(reg)`, or any other word (a symbol)

use crate::common::constants::{
    COMMENT_MARKER, DIRECTIVE_PREFIX, LABEL_TERMINATOR, OPERAND_SEPARATOR,
};
use crate::common::error::ParseError;
use crate::isa::abi::parse_register;
use crate::isa::format::OperandKind;

/// Classified operand text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OperandToken {
    /// Register spelling with its index (not yet range-checked).
    Register(i64),
    /// Integer literal; magnitudes beyond `i64` saturate.
    Immediate(i64),
    /// Anything else (labels, misspelled registers).
    Symbol,
}

/// One operand as written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Operand {
    /// Token classification.
    pub token: OperandToken,
    /// Source text, trimmed.
    pub text: String,
}

impl Operand {
    fn classify(text: &str) -> Self {
        let token = parse_register(text).map_or_else(
            || parse_integer(text).map_or(OperandToken::Symbol, OperandToken::Immediate),
            OperandToken::Register,
        );
        Self {
            token,
            text: text.to_string(),
        }
    }

    /// Syntactic kind, or `None` for symbols.
    pub const fn kind(&self) -> Option<OperandKind> {
        match self.token {
            OperandToken::Register(_) => Some(OperandKind::Register),
            OperandToken::Immediate(_) => Some(OperandKind::Immediate),
            OperandToken::Symbol => None,
        }
    }
}

/// Structure of a tokenized line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Line<'a> {
    /// Empty or whitespace only.
    Blank,
    /// Starts with `#`.
    Comment,
    /// A label definition with nothing after it.
    Label(&'a str),
    /// An assembler directive such as `.section`.
    Directive(&'a str),
    /// A candidate instruction.
    Instruction {
        /// Label defined in front of the instruction, if any.
        label: Option<&'a str>,
        /// Mnemonic as written.
        mnemonic: &'a str,
        /// Operands in written order; `imm(reg)` contributes two entries.
        operands: Vec<Operand>,
        /// True if an `imm(reg)` operand was used.
        memory_form: bool,
    },
}

/// Tokenizes one line.
///
/// # Errors
///
/// [`ParseError`] when the line has a first token but cannot be split into a mnemonic and an
/// operand list.
pub fn tokenize(line: &str) -> Result<Line<'_>, ParseError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(Line::Blank);
    }
    if trimmed.starts_with(COMMENT_MARKER) {
        return Ok(Line::Comment);
    }

    let code = trimmed
        .split_once(COMMENT_MARKER)
        .map_or(trimmed, |(code, _)| code)
        .trim_end();

    let (label, rest) = split_label(code);
    if rest.is_empty() {
        // `split_label` only returns an empty remainder after consuming a label.
        return Ok(label.map_or(Line::Blank, Line::Label));
    }
    if rest.starts_with(DIRECTIVE_PREFIX) {
        let name = rest.split_whitespace().next().unwrap_or(rest);
        return Ok(Line::Directive(name));
    }

    let (mnemonic, operand_text) = rest
        .split_once(char::is_whitespace)
        .map_or((rest, ""), |(m, ops)| (m, ops.trim()));
    if !is_mnemonic(mnemonic) {
        return Err(ParseError::InvalidMnemonic(mnemonic.to_string()));
    }

    let (operands, memory_form) = split_operands(operand_text)?;
    Ok(Line::Instruction {
        label,
        mnemonic,
        operands,
        memory_form,
    })
}

/// Splits a leading `label:` off `code`.
fn split_label(code: &str) -> (Option<&str>, &str) {
    let head_end = code.find(char::is_whitespace).unwrap_or(code.len());
    let head = &code[..head_end];
    match head.strip_suffix(LABEL_TERMINATOR) {
        Some(name) if is_identifier(name) => (Some(name), code[head_end..].trim_start()),
        _ => (None, code),
    }
}

/// `[A-Za-z][A-Za-z0-9_.]*`
fn is_mnemonic(text: &str) -> bool {
    let mut chars = text.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

/// `[A-Za-z_.$][A-Za-z0-9_.$]*`
fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || matches!(c, '_' | '.' | '$'))
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '$'))
}

/// Splits the operand list and expands memory operands.
fn split_operands(text: &str) -> Result<(Vec<Operand>, bool), ParseError> {
    if text.is_empty() {
        return Ok((Vec::new(), false));
    }
    check_parentheses(text)?;

    let mut operands = Vec::new();
    let mut memory_form = false;
    for (i, part) in text.split(OPERAND_SEPARATOR).enumerate() {
        let part = part.trim();
        if part.is_empty() {
            return Err(ParseError::EmptyOperand { position: i + 1 });
        }
        if let Some((offset, base)) = split_memory_operand(part)? {
            operands.push(offset);
            operands.push(base);
            memory_form = true;
        } else if part.contains(char::is_whitespace) {
            return Err(ParseError::MissingSeparator(part.to_string()));
        } else {
            operands.push(Operand::classify(part));
        }
    }
    Ok((operands, memory_form))
}

/// Parentheses must pair up and may not nest.
fn check_parentheses(text: &str) -> Result<(), ParseError> {
    let mut open = false;
    for c in text.chars() {
        match c {
            '(' if open => return Err(ParseError::UnbalancedParentheses),
            '(' => open = true,
            ')' if !open => return Err(ParseError::UnbalancedParentheses),
            ')' => open = false,
            OPERAND_SEPARATOR if open => return Err(ParseError::UnbalancedParentheses),
            _ => {}
        }
    }
    if open {
        return Err(ParseError::UnbalancedParentheses);
    }
    Ok(())
}

/// Splits `imm(reg)` into its two operands. An empty offset means `0`.
fn split_memory_operand(part: &str) -> Result<Option<(Operand, Operand)>, ParseError> {
    let Some((offset, tail)) = part.split_once('(') else {
        return Ok(None);
    };
    let Some((base, trailing)) = tail.split_once(')') else {
        return Err(ParseError::UnbalancedParentheses);
    };
    let base = base.trim();
    if base.is_empty() || !trailing.trim().is_empty() {
        return Err(ParseError::InvalidMemoryOperand(part.to_string()));
    }
    let offset = offset.trim();
    if base.contains(char::is_whitespace) || offset.contains(char::is_whitespace) {
        return Err(ParseError::MissingSeparator(part.to_string()));
    }

    let offset = if offset.is_empty() {
        Operand {
            token: OperandToken::Immediate(0),
            text: "0".to_string(),
        }
    } else {
        Operand::classify(offset)
    };
    Ok(Some((offset, Operand::classify(base))))
}

/// Parses a signed decimal, `0x` hexadecimal or `0b` binary literal.
///
/// Magnitudes beyond `i64` saturate to `i64::MIN` / `i64::MAX`.
pub fn parse_integer(text: &str) -> Option<i64> {
    let (negative, body) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let hex = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X"));
    let binary = body.strip_prefix("0b").or_else(|| body.strip_prefix("0B"));
    let (radix, digits) = match (hex, binary) {
        (Some(d), _) => (16, d),
        (None, Some(d)) => (2, d),
        (None, None) => (10, body),
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    let limit = if negative {
        i64::MIN.unsigned_abs()
    } else {
        i64::MAX.unsigned_abs()
    };
    let magnitude = u64::from_str_radix(digits, radix).map_or(limit, |m| m.min(limit));
    let value = if negative {
        0_i128 - i128::from(magnitude)
    } else {
        i128::from(magnitude)
    };
    i64::try_from(value).ok()
}
