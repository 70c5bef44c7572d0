//! Random instruction generation.
//!
//! The generator resolves a target set against the catalog and, for each target, draws
//! `count` operand tuples from the legal domains defined by the constraint engine:
//! 1. **Registers:** uniform over `0..=31`.
//! 2. **Immediates:** uniform over the aligned range; for B/J the draw is made over the
//!    even values directly, so no value is ever rejected and redrawn.
//!
//! Randomness is injected by the caller. The same seed and request always produce the same
//! instructions, which keeps generated suites reproducible.

/// Assembly text rendering of generated instructions.
pub mod render;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, warn};

use crate::common::constants::MAX_REGISTER;
use crate::common::error::{ConfigurationError, LookupError};
use crate::isa::catalog::{Catalog, InstructionSpec};
use crate::isa::constraints::{ImmediateConstraint, immediate_constraint};
use crate::isa::format::{InstructionFormat, OperandKind, OperandRole};

pub use render::{RenderOptions, Renderer};

/// Which instructions a request covers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Targets {
    /// Explicit mnemonics, resolved through the catalog. Duplicates are ignored.
    Mnemonics(Vec<String>),
    /// Every catalog instruction of one format.
    Format(InstructionFormat),
    /// Every catalog instruction.
    All,
}

/// A generation request: targets and instances per target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Instructions to generate.
    pub targets: Targets,
    /// Instances per resolved target; must be at least 1.
    pub count: usize,
}

impl GenerationRequest {
    /// Request for explicit mnemonics.
    pub fn mnemonics<I, S>(mnemonics: I, count: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            targets: Targets::Mnemonics(mnemonics.into_iter().map(Into::into).collect()),
            count,
        }
    }

    /// Request for every instruction of `format`.
    pub const fn format(format: InstructionFormat, count: usize) -> Self {
        Self {
            targets: Targets::Format(format),
            count,
        }
    }

    /// Request for every catalog instruction.
    pub const fn all(count: usize) -> Self {
        Self {
            targets: Targets::All,
            count,
        }
    }
}

/// One operand of a generated instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct OperandValue {
    /// Role the value fills.
    pub role: OperandRole,
    /// Register index or immediate value.
    pub value: i64,
}

/// A generated instruction instance, before rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GeneratedInstruction {
    /// Position in the generated sequence, starting at 0.
    pub index: usize,
    /// Lower-case mnemonic.
    pub mnemonic: String,
    /// Format of the instruction.
    pub format: InstructionFormat,
    /// Operands in assembly order.
    pub operands: Vec<OperandValue>,
}

impl GeneratedInstruction {
    /// Value bound to `role`, if the format has that role.
    pub fn value_of(&self, role: OperandRole) -> Option<i64> {
        self.operands
            .iter()
            .find(|op| op.role == role)
            .map(|op| op.value)
    }
}

/// Output of a generation request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Generation {
    /// Resolved target mnemonics, in request order.
    pub targets: Vec<String>,
    /// `count` instances per target, grouped by target.
    pub instructions: Vec<GeneratedInstruction>,
    /// Requested mnemonics that are not in the catalog, as written.
    pub unresolved: Vec<String>,
}

impl Generation {
    /// Number of generated instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// True if nothing was generated.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Instances generated for one mnemonic.
    pub fn for_mnemonic<'a>(
        &'a self,
        mnemonic: &'a str,
    ) -> impl Iterator<Item = &'a GeneratedInstruction> + 'a {
        self.instructions
            .iter()
            .filter(move |inst| inst.mnemonic.eq_ignore_ascii_case(mnemonic))
    }
}

/// Random instruction generator over a catalog.
#[derive(Clone, Copy, Debug)]
pub struct Generator<'a> {
    catalog: &'a Catalog,
}

impl<'a> Generator<'a> {
    /// Creates a generator reading from `catalog`.
    pub const fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Resolves a target set to catalog entries.
    ///
    /// Returns the resolved specs (request order, duplicates removed) and a lookup error for
    /// every explicit mnemonic the catalog lacks.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError`] when the target set resolves to no instruction at all.
    pub fn resolve(
        &self,
        targets: &Targets,
    ) -> Result<(Vec<&'a InstructionSpec>, Vec<LookupError>), ConfigurationError> {
        match targets {
            Targets::Mnemonics(names) => {
                if names.is_empty() {
                    return Err(ConfigurationError::NoTargets);
                }
                let mut resolved: Vec<&'a InstructionSpec> = Vec::new();
                let mut unresolved = Vec::new();
                for name in names {
                    match self.catalog.lookup(name) {
                        Ok(spec) if resolved.contains(&spec) => {
                            debug!(mnemonic = name.as_str(), "ignoring duplicate target");
                        }
                        Ok(spec) => resolved.push(spec),
                        Err(e) => {
                            warn!(mnemonic = name.as_str(), "instruction not found, skipping");
                            unresolved.push(e);
                        }
                    }
                }
                if resolved.is_empty() {
                    return Err(ConfigurationError::NoneResolved {
                        unresolved: unresolved.into_iter().map(|e| e.mnemonic).collect(),
                    });
                }
                Ok((resolved, unresolved))
            }
            Targets::Format(format) => {
                let resolved = self.catalog.list(Some(*format));
                if resolved.is_empty() {
                    return Err(ConfigurationError::EmptyFormat(*format));
                }
                Ok((resolved, Vec::new()))
            }
            Targets::All => {
                let resolved = self.catalog.list(None);
                if resolved.is_empty() {
                    return Err(ConfigurationError::EmptyCatalog);
                }
                Ok((resolved, Vec::new()))
            }
        }
    }

    /// Generates `request.count` instances of every resolved target, drawing from `rng`.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::ZeroCount`] for a zero count, otherwise as [`Generator::resolve`].
    pub fn generate<R: Rng>(
        &self,
        request: &GenerationRequest,
        rng: &mut R,
    ) -> Result<Generation, ConfigurationError> {
        if request.count == 0 {
            return Err(ConfigurationError::ZeroCount);
        }
        let (specs, unresolved) = self.resolve(&request.targets)?;

        let mut instructions = Vec::with_capacity(specs.len() * request.count);
        for spec in &specs {
            for _ in 0..request.count {
                let index = instructions.len();
                instructions.push(generate_instance(spec, index, rng));
            }
        }

        debug!(
            targets = specs.len(),
            count = request.count,
            generated = instructions.len(),
            "generated instructions"
        );

        Ok(Generation {
            targets: specs.iter().map(|spec| spec.mnemonic.clone()).collect(),
            instructions,
            unresolved: unresolved.into_iter().map(|e| e.mnemonic).collect(),
        })
    }

    /// Like [`Generator::generate`] with a `StdRng` seeded from `seed`.
    ///
    /// # Errors
    ///
    /// As [`Generator::generate`].
    pub fn generate_seeded(
        &self,
        request: &GenerationRequest,
        seed: u64,
    ) -> Result<Generation, ConfigurationError> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.generate(request, &mut rng)
    }
}

/// Draws one instance of `spec`.
pub fn generate_instance<R: Rng>(
    spec: &InstructionSpec,
    index: usize,
    rng: &mut R,
) -> GeneratedInstruction {
    let operands = spec
        .roles()
        .iter()
        .map(|&role| {
            let value = match role.kind() {
                OperandKind::Register => draw_register(rng),
                // Formats without an immediate constraint have no immediate role.
                OperandKind::Immediate => {
                    immediate_constraint(spec.format).map_or(0, |c| draw_immediate(&c, rng))
                }
            };
            OperandValue { role, value }
        })
        .collect();

    GeneratedInstruction {
        index,
        mnemonic: spec.mnemonic.clone(),
        format: spec.format,
        operands,
    }
}

/// Uniform register index in `0..=31`.
pub fn draw_register<R: Rng>(rng: &mut R) -> i64 {
    rng.gen_range(0..=MAX_REGISTER)
}

/// Uniform legal immediate: a uniform multiple of the alignment within the aligned range.
pub fn draw_immediate<R: Rng>(constraint: &ImmediateConstraint, rng: &mut R) -> i64 {
    let step = constraint.alignment;
    let lo = constraint.aligned_min() / step;
    let hi = constraint.aligned_max() / step;
    rng.gen_range(lo..=hi) * step
}
