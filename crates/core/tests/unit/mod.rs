//! # Unit Components
//!
//! Organizes the tests by component: the ISA model, the generator, the validator, and the
//! configuration layer.


/// Error type messages.
pub mod error;

/// Unit tests for the ISA model.
///
/// This module aggregates tests for:
/// - Formats and operand roles.
/// - Immediate and register constraints.
/// - ABI register names.
/// - The instruction catalog and its JSON loader.
pub mod isa;


/// Unit tests for line validation and reports.
pub mod validator;

/// Generate-then-validate properties over the whole catalog.
pub mod round_trip;
