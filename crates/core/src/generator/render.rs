//! Assembly text rendering.
//!
//! Turns [`GeneratedInstruction`]s into assembly lines: the mnemonic, one space, and the
//! operands joined by `", "` in role order. Stores use the `rs2, imm(rs1)` spelling unless
//! memory syntax is disabled, in which case they are written `rs2, rs1, imm`. The optional
//! trailing annotation is an ordinary `#` comment and carries no meaning for the validator.

use std::fmt::Write as _;

use crate::config::{GeneratorConfig, Radix};
use crate::generator::{GeneratedInstruction, Generation};
use crate::isa::abi::abi_name;
use crate::isa::format::{InstructionFormat, OperandKind, OperandRole};

/// Indentation of instruction lines inside a program prelude.
const INDENT: &str = "    ";

/// Rendering switches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Immediate number base.
    pub radix: Radix,
    /// Append `# role=value, ...` after each instruction.
    pub annotate: bool,
    /// Write registers by ABI name.
    pub abi_names: bool,
    /// Write S-Type operands as `rs2, imm(rs1)`.
    pub memory_syntax: bool,
    /// Start listings with `.section .text`, `.global _start` and `_start:`.
    pub prelude: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from(&GeneratorConfig::default())
    }
}

impl From<&GeneratorConfig> for RenderOptions {
    fn from(config: &GeneratorConfig) -> Self {
        Self {
            radix: config.radix,
            annotate: config.annotate,
            abi_names: config.abi_names,
            memory_syntax: config.memory_syntax,
            prelude: config.prelude,
        }
    }
}

/// Renders generated instructions as assembly text.
#[derive(Clone, Copy, Debug, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    /// Creates a renderer with `options`.
    pub const fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Renders one instruction, with its annotation if enabled.
    pub fn line(&self, inst: &GeneratedInstruction) -> String {
        let mut line = self.instruction(inst);
        if self.options.annotate {
            line.push_str("  # ");
            line.push_str(&self.annotation(inst));
        }
        line
    }

    /// Renders the instruction text alone: mnemonic and operands.
    pub fn instruction(&self, inst: &GeneratedInstruction) -> String {
        let operands = match self.memory_operands(inst) {
            Some((data, offset, base)) => format!(
                "{}, {}({})",
                self.register(data),
                self.immediate(offset),
                self.register(base)
            ),
            None => inst
                .operands
                .iter()
                .map(|op| self.operand(op.role.kind(), op.value))
                .collect::<Vec<_>>()
                .join(", "),
        };

        if operands.is_empty() {
            inst.mnemonic.clone()
        } else {
            format!("{} {operands}", inst.mnemonic)
        }
    }

    /// Role bindings, e.g. `rd=x1, rs1=x2, imm=-5`.
    pub fn annotation(&self, inst: &GeneratedInstruction) -> String {
        inst.operands
            .iter()
            .map(|op| format!("{}={}", op.role, self.operand(op.role.kind(), op.value)))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Renders every line of a generation, without headers.
    pub fn lines(&self, generation: &Generation) -> Vec<String> {
        generation
            .instructions
            .iter()
            .map(|inst| self.line(inst))
            .collect()
    }

    /// Renders a complete listing.
    ///
    /// Header comments name the targets, each target gets a `# <mnemonic> instructions`
    /// section, and every unresolved mnemonic is reported as a `# WARNING:` comment. The
    /// output contains only instructions, comments, blank lines, and (with the prelude)
    /// directives and a label, so it validates cleanly.
    pub fn listing(&self, generation: &Generation) -> String {
        let mut out = String::new();
        let indent = if self.options.prelude { INDENT } else { "" };

        let _ = writeln!(out, "# Generated RISC-V Assembly Code");
        let _ = writeln!(out, "# Instructions: {}", generation.targets.join(", "));
        for missing in &generation.unresolved {
            let _ = writeln!(out, "# WARNING: Instruction '{missing}' not found");
        }
        out.push('\n');

        if self.options.prelude {
            out.push_str(".section .text\n");
            out.push_str(".global _start\n\n");
            out.push_str("_start:\n");
        }

        for target in &generation.targets {
            let _ = writeln!(out, "{indent}# {target} instructions");
            for inst in generation.for_mnemonic(target) {
                let _ = writeln!(out, "{indent}{}", self.line(inst));
            }
            out.push('\n');
        }

        out
    }

    /// `(rs2, imm, rs1)` of a store rendered as `rs2, imm(rs1)`.
    fn memory_operands(&self, inst: &GeneratedInstruction) -> Option<(i64, i64, i64)> {
        if !self.options.memory_syntax || inst.format != InstructionFormat::S {
            return None;
        }
        Some((
            inst.value_of(OperandRole::Rs2)?,
            inst.value_of(OperandRole::Imm)?,
            inst.value_of(OperandRole::Rs1)?,
        ))
    }

    fn operand(&self, kind: OperandKind, value: i64) -> String {
        match kind {
            OperandKind::Register => self.register(value),
            OperandKind::Immediate => self.immediate(value),
        }
    }

    fn register(&self, idx: i64) -> String {
        match abi_name(idx) {
            Some(name) if self.options.abi_names => name.to_string(),
            _ => format!("x{idx}"),
        }
    }

    fn immediate(&self, value: i64) -> String {
        match self.options.radix {
            Radix::Decimal => value.to_string(),
            Radix::Hexadecimal if value < 0 => format!("-{:#x}", value.unsigned_abs()),
            Radix::Hexadecimal => format!("{value:#x}"),
        }
    }
}
