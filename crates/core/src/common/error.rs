//! Error definitions.
//!
//! This module defines the failure types of the crate. It provides:
//! 1. **Lookup errors:** A mnemonic absent from the catalog (always recoverable).
//! 2. **Configuration errors:** A generation request that resolves to nothing (fatal for the
//!    request).
//! 3. **Tokenizer errors:** A line that cannot be split into mnemonic and operands.
//! 4. **Loading errors:** Catalog and config files that cannot be read or parsed.
//!
//! Operand constraint violations are not errors: the validator reports them as findings.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::isa::format::InstructionFormat;

/// A mnemonic was not found in the catalog.
///
/// Batch operations never abort on this error; the generator returns it alongside the
/// instructions it could produce and the validator turns it into a finding.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown instruction '{mnemonic}'")]
pub struct LookupError {
    /// The mnemonic as the caller spelled it.
    pub mnemonic: String,
}

impl LookupError {
    /// Creates a lookup error for `mnemonic`.
    pub fn new(mnemonic: impl Into<String>) -> Self {
        Self {
            mnemonic: mnemonic.into(),
        }
    }
}

/// A generation request that cannot produce any output.
///
/// Producing nothing is never a silent success, so each of these fails the whole request.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// The instance count was zero.
    #[error("instance count must be at least 1")]
    ZeroCount,

    /// An explicit target list was empty.
    #[error("no target instructions were requested")]
    NoTargets,

    /// The catalog holds no instruction of the requested format.
    #[error("no instructions found for format {0}")]
    EmptyFormat(InstructionFormat),

    /// The catalog is empty and every instruction was requested.
    #[error("the instruction catalog is empty")]
    EmptyCatalog,

    /// None of the explicitly requested mnemonics exist in the catalog.
    #[error("none of the requested instructions exist: {}", unresolved.join(", "))]
    NoneResolved {
        /// Every requested mnemonic, all of which failed lookup.
        unresolved: Vec<String>,
    },
}

/// Reasons a line cannot be tokenized into a mnemonic and an operand list.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The first token is not a valid mnemonic spelling.
    #[error("invalid mnemonic '{0}'")]
    InvalidMnemonic(String),

    /// Parentheses in the operand list do not pair up.
    #[error("unbalanced parentheses")]
    UnbalancedParentheses,

    /// Two separators with nothing between them, or a trailing separator.
    #[error("empty operand at position {position}")]
    EmptyOperand {
        /// 1-based operand position.
        position: usize,
    },

    /// A memory operand is not of the form `imm(reg)`.
    #[error("malformed memory operand '{0}'")]
    InvalidMemoryOperand(String),

    /// Whitespace inside one operand, usually a missing `,`.
    #[error("missing ',' between operands in '{0}'")]
    MissingSeparator(String),
}

/// Failures while building or loading an instruction catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog {}: {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The catalog text is not valid JSON.
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON is well-formed but not shaped like an opcode table.
    #[error("unexpected catalog layout: {0}")]
    Shape(String),

    /// A mnemonic was registered twice through the builder.
    #[error("instruction '{mnemonic}' is already registered")]
    Duplicate {
        /// The conflicting mnemonic.
        mnemonic: String,
    },
}

/// Failures while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The config text is not valid JSON for [`Config`](crate::config::Config).
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}
