//! # ISA Unit Tests
//!
//! Tests for the format model, the constraint engine, ABI names, and the catalog.



/// Immediate and register constraint predicates.
pub mod constraints;
