//! Instruction Catalog.
//!
//! The catalog maps each mnemonic to its [`InstructionSpec`]. It is built once, either from the
//! builtin RV32/RV64 tables or from an opcode JSON table, and is read-only afterwards; the
//! generator and validator only ever hold `&Catalog`.
//!
//! Mutation is confined to [`CatalogBuilder`], an administrative layer that produces a new
//! catalog and is never consulted during generation or validation.
//!
//! # JSON layout
//!
//! The loader reads the layout written by opcode fetchers: extensions at the top level, each
//! mapping mnemonics to records with at least a `format` tag. Other record fields are ignored.
//!
//! ```json
//! {
//!   "rv_i": {
//!     "add":  { "format": "R", "opcode": 51, "funct3": 0, "funct7": 0 },
//!     "addi": { "format": "I", "opcode": 19, "funct3": 0 }
//!   }
//! }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::common::error::{CatalogError, LookupError};
use crate::isa::constraints::{BASE_OFFSET_MNEMONICS, memory_operand_roles, operand_roles};
use crate::isa::format::{InstructionFormat, OperandRole};
use crate::isa::{rv32i, rv32m, rv64i, rv64m};

/// Prefix of pseudo-op import entries in opcode tables.
const PSEUDO_OP_PREFIX: char = '$';

/// A single catalog entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct InstructionSpec {
    /// Lower-case mnemonic.
    pub mnemonic: String,
    /// Format, which fixes the operand layout.
    pub format: InstructionFormat,
    /// Name of the extension table the entry came from.
    pub extension: String,
}

impl InstructionSpec {
    /// Creates a spec; the mnemonic is stored lower-case.
    pub fn new(
        mnemonic: impl AsRef<str>,
        format: InstructionFormat,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            mnemonic: mnemonic.as_ref().trim().to_ascii_lowercase(),
            format,
            extension: extension.into(),
        }
    }

    /// Operand roles of this instruction, in assembly order.
    pub const fn roles(&self) -> &'static [OperandRole] {
        operand_roles(self.format)
    }

    /// Operand roles when written with an `imm(rs1)` operand.
    ///
    /// `None` unless this is a store, a load, or `jalr`.
    pub fn memory_roles(&self) -> Option<&'static [OperandRole]> {
        let base_offset = BASE_OFFSET_MNEMONICS.contains(&self.mnemonic.as_str());
        match self.format {
            InstructionFormat::I if !base_offset => None,
            format => memory_operand_roles(format),
        }
    }
}

/// Subset of an opcode record the catalog cares about.
#[derive(Deserialize)]
struct OpcodeRecord {
    #[serde(default)]
    format: Option<String>,
}

/// Immutable mnemonic to [`InstructionSpec`] mapping.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    specs: Vec<InstructionSpec>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Builds the catalog from the builtin RV32I, RV32M, RV64I and RV64M tables, in that order.
    pub fn builtin() -> Self {
        let mut builder = CatalogBuilder::new();
        for (extension, table) in [
            (rv32i::EXTENSION, rv32i::INSTRUCTIONS),
            (rv32m::EXTENSION, rv32m::INSTRUCTIONS),
            (rv64i::EXTENSION, rv64i::INSTRUCTIONS),
            (rv64m::EXTENSION, rv64m::INSTRUCTIONS),
        ] {
            for &(mnemonic, format) in table {
                let spec = InstructionSpec::new(mnemonic, format, extension);
                let _ = builder.insert_first_wins(spec);
            }
        }
        builder.build()
    }

    /// Parses an opcode table (see the module docs for the layout).
    ///
    /// Pseudo-op imports (`$...`) are skipped. Entries whose format is missing or outside
    /// `R`/`I`/`S`/`B`/`U`/`J` are skipped with a warning. When a mnemonic occurs in several
    /// extensions the first occurrence wins.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Json`] for malformed JSON and [`CatalogError::Shape`] when the top level
    /// or an extension table is not a JSON object.
    pub fn from_json_str(text: &str) -> Result<Self, CatalogError> {
        let root: Value = serde_json::from_str(text)?;
        let Value::Object(extensions) = root else {
            return Err(CatalogError::Shape(
                "top level must be an object keyed by extension".to_string(),
            ));
        };

        let mut builder = CatalogBuilder::new();
        for (extension, table) in &extensions {
            let Value::Object(entries) = table else {
                return Err(CatalogError::Shape(format!(
                    "extension '{extension}' must map mnemonics to records"
                )));
            };
            load_extension(&mut builder, extension, entries);
        }

        let catalog = builder.build();
        debug!(
            instructions = catalog.len(),
            extensions = extensions.len(),
            "loaded instruction catalog"
        );
        Ok(catalog)
    }

    /// Reads and parses an opcode table file.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Io`] if the file cannot be read, otherwise as [`Catalog::from_json_str`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Looks up a mnemonic, ignoring case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// [`LookupError`] when the mnemonic is not in the catalog.
    pub fn lookup(&self, mnemonic: &str) -> Result<&InstructionSpec, LookupError> {
        let key = mnemonic.trim().to_ascii_lowercase();
        self.index
            .get(&key)
            .map(|&i| &self.specs[i])
            .ok_or_else(|| LookupError::new(mnemonic))
    }

    /// True if the mnemonic is in the catalog.
    pub fn contains(&self, mnemonic: &str) -> bool {
        self.lookup(mnemonic).is_ok()
    }

    /// Instructions in table order, optionally restricted to one format.
    pub fn list(&self, format: Option<InstructionFormat>) -> Vec<&InstructionSpec> {
        self.specs
            .iter()
            .filter(|spec| format.is_none_or(|f| spec.format == f))
            .collect()
    }

    /// Iterates over every instruction in table order.
    pub fn iter(&self) -> impl Iterator<Item = &InstructionSpec> {
        self.specs.iter()
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// True if the catalog holds no instructions.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Extension names in first-seen order.
    pub fn extensions(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for spec in &self.specs {
            if !seen.contains(&spec.extension.as_str()) {
                seen.push(&spec.extension);
            }
        }
        seen
    }

    /// Copies the catalog into a builder for administrative edits.
    pub fn to_builder(&self) -> CatalogBuilder {
        CatalogBuilder {
            specs: self.specs.clone(),
            index: self.index.clone(),
        }
    }

    /// Serializes the catalog in the opcode-table layout accepted by [`Catalog::from_json_str`].
    pub fn to_json_value(&self) -> Value {
        let mut root = Map::new();
        for extension in self.extensions() {
            let mut table = Map::new();
            for spec in self.specs.iter().filter(|s| s.extension == extension) {
                let mut record = Map::new();
                let _ = record.insert(
                    "format".to_string(),
                    Value::String(spec.format.tag().to_string()),
                );
                let _ = table.insert(spec.mnemonic.clone(), Value::Object(record));
            }
            let _ = root.insert(extension.to_string(), Value::Object(table));
        }
        Value::Object(root)
    }
}

/// Adds the usable entries of one extension table to `builder`.
fn load_extension(builder: &mut CatalogBuilder, extension: &str, entries: &Map<String, Value>) {
    for (name, entry) in entries {
        if name.starts_with(PSEUDO_OP_PREFIX) {
            debug!(extension, name = name.as_str(), "skipping pseudo-op import");
            continue;
        }

        let record = match OpcodeRecord::deserialize(entry) {
            Ok(record) => record,
            Err(e) => {
                warn!(
                    extension,
                    name = name.as_str(),
                    error = %e,
                    "skipping unreadable opcode record"
                );
                continue;
            }
        };

        let Some(tag) = record.format else {
            warn!(extension, name = name.as_str(), "skipping instruction without a format");
            continue;
        };
        let format = match tag.parse::<InstructionFormat>() {
            Ok(format) => format,
            Err(e) => {
                warn!(extension, name = name.as_str(), error = %e, "skipping instruction");
                continue;
            }
        };

        if !builder.insert_first_wins(InstructionSpec::new(name, format, extension)) {
            debug!(
                extension,
                name = name.as_str(),
                "instruction already defined by an earlier extension"
            );
        }
    }
}

/// Administrative editor for catalogs.
///
/// Accumulates entries and produces an immutable [`Catalog`] with [`CatalogBuilder::build`].
#[derive(Clone, Debug, Default)]
pub struct CatalogBuilder {
    specs: Vec<InstructionSpec>,
    index: HashMap<String, usize>,
}

impl CatalogBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new instruction.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Duplicate`] if the mnemonic is already registered.
    pub fn insert(&mut self, spec: InstructionSpec) -> Result<(), CatalogError> {
        if self.index.contains_key(&spec.mnemonic) {
            return Err(CatalogError::Duplicate {
                mnemonic: spec.mnemonic,
            });
        }
        let _ = self.insert_first_wins(spec);
        Ok(())
    }

    /// Removes an instruction by mnemonic (case-insensitive), returning it if present.
    pub fn remove(&mut self, mnemonic: &str) -> Option<InstructionSpec> {
        let key = mnemonic.trim().to_ascii_lowercase();
        let position = self.index.remove(&key)?;
        let removed = self.specs.remove(position);
        for slot in self.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    /// Number of registered instructions.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Freezes the builder into a catalog.
    pub fn build(self) -> Catalog {
        Catalog {
            specs: self.specs,
            index: self.index,
        }
    }

    /// Adds `spec` unless its mnemonic exists; returns whether it was added.
    fn insert_first_wins(&mut self, spec: InstructionSpec) -> bool {
        if self.index.contains_key(&spec.mnemonic) {
            return false;
        }
        let _ = self.index.insert(spec.mnemonic.clone(), self.specs.len());
        self.specs.push(spec);
        true
    }
}
