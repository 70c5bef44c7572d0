//! # Validator Unit Tests
//!
//! Per-line classification and findings, and the aggregate report.

/// Line classification and operand findings.
pub mod lines;
