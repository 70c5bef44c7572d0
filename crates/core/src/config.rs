//! Configuration for the generator and validator.
//!
//! This module defines the configuration structures used to parameterize generation and
//! validation. It provides:
//! 1. **Defaults:** Baseline values used when a field is absent.
//! 2. **Structures:** `GeneratorConfig` and `ValidatorConfig` under a root `Config`.
//! 3. **Enums:** Immediate radix and the zero-register warning policy.
//!
//! Configuration is read from JSON; every field is optional, or use `Config::default()`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::error::ConfigError;

/// Default configuration constants.
mod defaults {
    /// Instances generated per target instruction.
    pub const COUNT: usize = 1;

    /// Append a `# rd=.., rs1=..` comment to each generated line.
    pub const ANNOTATE: bool = true;

    /// Render registers as `x<N>` rather than ABI names.
    pub const ABI_NAMES: bool = false;

    /// Render S-Type as `rs2, imm(rs1)`.
    pub const MEMORY_SYNTAX: bool = true;

    /// Emit `.section .text` / `_start:` ahead of generated code.
    pub const PRELUDE: bool = false;
}

/// Number base used when rendering immediates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Radix {
    /// Plain decimal (`-1736`).
    #[default]
    #[serde(alias = "decimal", alias = "dec")]
    Decimal,
    /// `0x`-prefixed hexadecimal, negative values as `-0x6c8`.
    #[serde(alias = "hexadecimal", alias = "hex", alias = "Hex")]
    Hexadecimal,
}

/// When the validator warns about the hardwired-zero register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ZeroRegisterPolicy {
    /// Warn whenever `x0` appears in any register operand.
    #[default]
    AnyRole,
    /// Warn only when `x0` is the destination, where the write is discarded.
    DestinationOnly,
    /// Never warn.
    Off,
}

/// Root configuration.
///
/// # Example
///
/// ```
/// use rvforge_core::config::{Config, Radix, ZeroRegisterPolicy};
///
/// let json = r#"{
///     "generator": { "count": 4, "seed": 7, "radix": "Hexadecimal" },
///     "validator": { "zero_register": "DestinationOnly" }
/// }"#;
///
/// let config = Config::from_json_str(json).unwrap();
/// assert_eq!(config.generator.count, 4);
/// assert_eq!(config.generator.seed, Some(7));
/// assert_eq!(config.generator.radix, Radix::Hexadecimal);
/// assert!(config.generator.annotate);
/// assert_eq!(config.validator.zero_register, ZeroRegisterPolicy::DestinationOnly);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Generation settings.
    #[serde(default)]
    pub generator: GeneratorConfig,
    /// Validation settings.
    #[serde(default)]
    pub validator: ValidatorConfig,
}

impl Config {
    /// Parses a JSON configuration.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Json`] if the text is not valid JSON for this structure.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as [`Config::from_json_str`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}

/// Generator settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneratorConfig {
    /// Instances to generate per target instruction.
    #[serde(default = "GeneratorConfig::default_count")]
    pub count: usize,

    /// RNG seed; `None` draws a fresh seed per run.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Immediate number base.
    #[serde(default)]
    pub radix: Radix,

    /// Append role bindings as a trailing comment.
    #[serde(default = "GeneratorConfig::default_annotate")]
    pub annotate: bool,

    /// Use ABI register names (`a0`, `sp`) instead of `x<N>`.
    #[serde(default = "GeneratorConfig::default_abi_names")]
    pub abi_names: bool,

    /// Write S-Type operands as `rs2, imm(rs1)`.
    #[serde(default = "GeneratorConfig::default_memory_syntax")]
    pub memory_syntax: bool,

    /// Start listings with a `.text` section header and `_start` label.
    #[serde(default = "GeneratorConfig::default_prelude")]
    pub prelude: bool,
}

impl GeneratorConfig {
    fn default_count() -> usize {
        defaults::COUNT
    }

    fn default_annotate() -> bool {
        defaults::ANNOTATE
    }

    fn default_abi_names() -> bool {
        defaults::ABI_NAMES
    }

    fn default_memory_syntax() -> bool {
        defaults::MEMORY_SYNTAX
    }

    fn default_prelude() -> bool {
        defaults::PRELUDE
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: defaults::COUNT,
            seed: None,
            radix: Radix::default(),
            annotate: defaults::ANNOTATE,
            abi_names: defaults::ABI_NAMES,
            memory_syntax: defaults::MEMORY_SYNTAX,
            prelude: defaults::PRELUDE,
        }
    }
}

/// Validator settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ValidatorConfig {
    /// When to warn about `x0`.
    #[serde(default)]
    pub zero_register: ZeroRegisterPolicy,
}
