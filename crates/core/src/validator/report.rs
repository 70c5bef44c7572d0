//! Aggregate validation report.
//!
//! Collects the verdict of every line and derives the summary counters. The report is plain
//! data (serializable with serde) plus a text rendering in the same banner layout as the
//! command-line tools print.

use std::fmt::Write as _;

use serde::Serialize;

use crate::validator::verdict::{Finding, LineClass, LineVerdict};

const BANNER: &str = "==========================================================";
const RULE: &str = "----------------------------------------------------------";

/// Counters over a whole input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Lines read, including blanks and comments.
    pub total_lines: usize,
    /// Lines classified as instructions, valid or not.
    pub instruction_lines: usize,
    /// Instruction lines without errors.
    pub valid_instructions: usize,
    /// Warning findings across all lines.
    pub warnings: usize,
    /// Error findings across all lines.
    pub errors: usize,
}

impl Summary {
    fn tally(lines: &[LineVerdict]) -> Self {
        let mut summary = Self {
            total_lines: lines.len(),
            ..Self::default()
        };
        for line in lines {
            if line.class == LineClass::Instruction {
                summary.instruction_lines += 1;
                if line.is_valid() {
                    summary.valid_instructions += 1;
                }
            }
            summary.errors += line.error_count();
            summary.warnings += line.warning_count();
        }
        summary
    }
}

/// Verdicts for every line of an input plus the aggregate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Name of the validated input (file path, `<stdin>`, ...).
    pub source: String,
    /// True iff no line carries an error.
    pub valid: bool,
    /// Aggregate counters.
    pub summary: Summary,
    /// One verdict per input line, in order.
    pub lines: Vec<LineVerdict>,
}

impl ValidationReport {
    /// Builds a report from line verdicts.
    pub fn new(source: impl Into<String>, lines: Vec<LineVerdict>) -> Self {
        let summary = Summary::tally(&lines);
        Self {
            source: source.into(),
            valid: summary.errors == 0,
            summary,
            lines,
        }
    }

    /// Replaces the source name.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// True iff every line verdict is valid.
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// `(line_number, finding)` for every error, in line order.
    pub fn errors(&self) -> impl Iterator<Item = (usize, &Finding)> {
        self.findings().filter(|(_, f)| f.is_error())
    }

    /// `(line_number, finding)` for every warning, in line order.
    pub fn warnings(&self) -> impl Iterator<Item = (usize, &Finding)> {
        self.findings().filter(|(_, f)| !f.is_error())
    }

    fn findings(&self) -> impl Iterator<Item = (usize, &Finding)> {
        self.lines
            .iter()
            .flat_map(|line| line.findings.iter().map(move |f| (line.line_number, f)))
    }

    /// Renders the report as text.
    ///
    /// # Arguments
    ///
    /// * `verbose` - Append a per-line listing of every instruction line.
    pub fn render_text(&self, verbose: bool) -> String {
        let mut out = String::new();
        let s = &self.summary;

        let _ = writeln!(out, "{BANNER}");
        let _ = writeln!(out, "RISC-V ASSEMBLY VALIDATION REPORT");
        let _ = writeln!(out, "{BANNER}");
        let _ = writeln!(out, "source                   {}", self.source);
        let _ = writeln!(out, "total_lines              {}", s.total_lines);
        let _ = writeln!(out, "instruction_lines        {}", s.instruction_lines);
        let _ = writeln!(out, "valid_instructions       {}", s.valid_instructions);
        let _ = writeln!(out, "errors                   {}", s.errors);
        let _ = writeln!(out, "warnings                 {}", s.warnings);
        let _ = writeln!(
            out,
            "result                   {}",
            if self.valid { "VALID" } else { "INVALID" }
        );

        if s.errors > 0 {
            let _ = writeln!(out, "{RULE}");
            let _ = writeln!(out, "ERRORS");
            for (line, finding) in self.errors() {
                let _ = writeln!(out, "  line {line:<5} {}: {}", finding.code, finding.message);
            }
        }

        if s.warnings > 0 {
            let _ = writeln!(out, "{RULE}");
            let _ = writeln!(out, "WARNINGS");
            for (line, finding) in self.warnings() {
                let _ = writeln!(out, "  line {line:<5} {}: {}", finding.code, finding.message);
            }
        }

        if verbose {
            let _ = writeln!(out, "{RULE}");
            let _ = writeln!(out, "LINES");
            for line in self
                .lines
                .iter()
                .filter(|l| matches!(l.class, LineClass::Instruction | LineClass::Malformed))
            {
                let mark = if line.is_valid() { "ok  " } else { "FAIL" };
                let _ = writeln!(
                    out,
                    "  {:>5} {mark} {}",
                    line.line_number,
                    line.text.trim()
                );
            }
        }

        let _ = writeln!(out, "{BANNER}");
        out
    }
}
